use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub mobile_country_code: Option<String>,
    #[serde(default)]
    pub phone_country_code: Option<String>,
    #[serde(default)]
    pub receive_email_marketing: Option<bool>,
    #[serde(default)]
    pub receive_sms_marketing: Option<bool>,
}

impl CustomerInfo {
    pub fn is_empty(&self) -> bool {
        *self == CustomerInfo::default()
    }

    /// Form fields in the provider's `Customer[...]` notation, only for the
    /// values that are present.
    pub fn to_form_fields(&self) -> Vec<(&'static str, String)> {
        let text = [
            ("Customer[Title]", &self.title),
            ("Customer[FirstName]", &self.first_name),
            ("Customer[Surname]", &self.surname),
            ("Customer[Email]", &self.email),
            ("Customer[Mobile]", &self.mobile),
            ("Customer[Phone]", &self.phone),
            ("Customer[MobileCountryCode]", &self.mobile_country_code),
            ("Customer[PhoneCountryCode]", &self.phone_country_code),
        ];
        let flags = [
            ("Customer[ReceiveEmailMarketing]", self.receive_email_marketing),
            ("Customer[ReceiveSmsMarketing]", self.receive_sms_marketing),
        ];

        let mut fields: Vec<(&'static str, String)> = text
            .into_iter()
            .filter_map(|(key, value)| value.as_ref().map(|v| (key, v.clone())))
            .collect();
        fields.extend(
            flags
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v.to_string()))),
        );
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_fields_only_present_values() {
        let customer = CustomerInfo {
            first_name: Some("John".to_string()),
            surname: Some("Smith".to_string()),
            email: Some("john@example.com".to_string()),
            receive_sms_marketing: Some(false),
            ..Default::default()
        };
        let fields = customer.to_form_fields();
        assert_eq!(
            fields,
            vec![
                ("Customer[FirstName]", "John".to_string()),
                ("Customer[Surname]", "Smith".to_string()),
                ("Customer[Email]", "john@example.com".to_string()),
                ("Customer[ReceiveSmsMarketing]", "false".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_customer() {
        assert!(CustomerInfo::default().is_empty());
        assert!(CustomerInfo::default().to_form_fields().is_empty());
        let json = r#"{"first_name":null,"email":null}"#;
        let parsed: CustomerInfo = serde_json::from_str(json).unwrap();
        assert!(parsed.is_empty());
    }
}
