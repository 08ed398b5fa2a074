// Code generated by docrule. DO NOT EDIT.

use docrule_runtime::regex;
use std::sync;
static ORDER_CODE_PATTERN: sync::LazyLock<regex::Regex> = sync::LazyLock::new(|| {
    regex::Regex::new("^[A-Z]{3}-[0-9]+$").expect("invalid ORDER_CODE_PATTERN")
});
impl Order {
    pub fn validate(&self) -> Result<(), docrule_runtime::ValidationErrors> {
        let mut errors = docrule_runtime::ValidationErrors::new();
        if ![PENDING, ACTIVE].contains(&self.status) {
            errors.add("status", "must be one of: PENDING, ACTIVE");
        }
        if !self.accepted {
            errors.add("accepted", "must equal true");
        }
        if !ORDER_CODE_PATTERN.is_match(&self.code) {
            errors.add("code", "must match pattern ^[A-Z]{3}-[0-9]+$");
        }
        errors.into_result()
    }
}
impl docrule_runtime::Validate for Order {
    fn validate(&self) -> Result<(), docrule_runtime::ValidationErrors> {
        Order::validate(self)
    }
}
