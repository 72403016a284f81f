use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Suppliers and customers share one backend collection, discriminated by
/// this type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartnerType {
    Supplier,
    Customer,
}

impl PartnerType {
    pub fn label(&self) -> &'static str {
        match self {
            PartnerType::Supplier => "Nhà cung cấp",
            PartnerType::Customer => "Khách hàng",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub partner_type: PartnerType,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub partner_type: PartnerType,
}

impl PartnerDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err(format!("Vui lòng nhập tên {}", self.partner_type.label().to_lowercase()));
        }
        if let Some(email) = self.email.as_deref() {
            if !email.trim().is_empty() && !email.contains('@') {
                return Err("Email không hợp lệ".into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partner_type_wire_format_is_screaming() {
        let json = serde_json::to_string(&PartnerType::Supplier).unwrap();
        assert_eq!(json, "\"SUPPLIER\"");
        let back: PartnerType = serde_json::from_str("\"CUSTOMER\"").unwrap();
        assert_eq!(back, PartnerType::Customer);
    }
}
