// Code generated by docrule. DO NOT EDIT.

use docrule_runtime::regex;
use std::sync;
use std::time;
static EMAIL_PATTERN: sync::LazyLock<regex::Regex> = sync::LazyLock::new(|| {
    regex::Regex::new("^[^@\\s]+@[^@\\s]+\\.[^@\\s]+$").expect("invalid EMAIL_PATTERN")
});
impl Order {
    pub fn validate(&self) -> Result<(), docrule_runtime::ValidationErrors> {
        let mut errors = docrule_runtime::ValidationErrors::new();
        if !docrule_runtime::one_of(&self.status, &["pending", "active", "completed"]) {
            errors.add("status", "must be one of: pending, active, completed");
        }
        match docrule_runtime::parse_duration(&self.timeout) {
            Ok(parsed) => {
                if parsed < time::Duration::new(1, 0) {
                    errors.add("timeout", "duration must be at least 1s");
                }
                if parsed > time::Duration::new(3600, 0) {
                    errors.add("timeout", "duration must be at most 1h");
                }
            }
            Err(_) => {
                errors.add("timeout", "must be a valid duration");
            }
        }
        for (index, item) in self.contacts.iter().enumerate() {
            let field = format!("contacts[{index}]");
            if !EMAIL_PATTERN.is_match(item) {
                errors.add(field.as_str(), "must be a valid email address");
            }
        }
        errors.into_result()
    }
}
impl docrule_runtime::Validate for Order {
    fn validate(&self) -> Result<(), docrule_runtime::ValidationErrors> {
        Order::validate(self)
    }
}
