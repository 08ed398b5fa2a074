// Code generated by docrule. DO NOT EDIT.

impl Account {
    pub fn validate(&self) -> Result<(), docrule_runtime::ValidationErrors> {
        let mut errors = docrule_runtime::ValidationErrors::new();
        if let Err(nested) = self.owner.validate() {
            errors.merge("owner", nested);
        }
        if self.seats < 1 {
            errors.add("seats", "must be at least 1");
        }
        if self.seats > 10 {
            errors.add("seats", "must be at most 10");
        }
        errors.into_result()
    }
}
impl docrule_runtime::Validate for Account {
    fn validate(&self) -> Result<(), docrule_runtime::ValidationErrors> {
        Account::validate(self)
    }
}
