// Code generated by docrule. DO NOT EDIT.

impl User {
    pub fn validate(&self) -> Result<(), docrule_runtime::ValidationErrors> {
        let mut errors = docrule_runtime::ValidationErrors::new();
        if self.name.is_empty() {
            errors.add("name", "must not be empty");
        }
        if self.name.chars().count() < 3 {
            errors.add("name", "length must be at least 3");
        }
        if let Some(value) = &self.nick {
            if value.chars().count() > 4 {
                errors.add("nick", "length must be at most 4");
            }
        }
        errors.into_result()
    }
}
impl docrule_runtime::Validate for User {
    fn validate(&self) -> Result<(), docrule_runtime::ValidationErrors> {
        User::validate(self)
    }
}
