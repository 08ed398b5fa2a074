// Code generated by docrule. DO NOT EDIT.

impl Address {
    pub fn validate(&self) -> Result<(), docrule_runtime::ValidationErrors> {
        let mut errors = docrule_runtime::ValidationErrors::new();
        if self.city.is_empty() {
            errors.add("city", "must not be empty");
        }
        errors.into_result()
    }
}
impl docrule_runtime::Validate for Address {
    fn validate(&self) -> Result<(), docrule_runtime::ValidationErrors> {
        Address::validate(self)
    }
}
impl Book {
    pub fn validate(&self) -> Result<(), docrule_runtime::ValidationErrors> {
        let mut errors = docrule_runtime::ValidationErrors::new();
        if self.owner.is_none() {
            errors.add("owner", "is required");
        }
        for (key, item) in self.addresses.iter() {
            let field = format!("addresses[{key}]");
            if let Err(nested) = item.validate() {
                errors.merge(field.as_str(), nested);
            }
        }
        for (index, item) in self.history.iter().enumerate() {
            let field = format!("history[{index}]");
            if let Some(value) = item {
                if let Err(nested) = value.validate() {
                    errors.merge(field.as_str(), nested);
                }
            }
        }
        for (index, item) in self.scores.iter().enumerate() {
            let field = format!("scores[{index}]");
            if *item < 1 {
                errors.add(field.as_str(), "must be at least 1");
            }
        }
        errors.into_result()
    }
}
impl docrule_runtime::Validate for Book {
    fn validate(&self) -> Result<(), docrule_runtime::ValidationErrors> {
        Book::validate(self)
    }
}
