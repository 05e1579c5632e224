//! # Form validation
//!
//! Each form is a plain struct of the raw input strings. `validate` checks
//! every field, collecting one message per failing field, and only yields the
//! request payload when all of them pass. Views render the messages next to
//! their inputs with [`FieldErrors::get`] and block submission otherwise.

use api::{
    AccountType, LoginRequest, Product, ProductPayload, RegisterRequest, ShippingInfo,
};

/// Per-field validation messages, in field order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldErrors {
    errors: Vec<(&'static str, String)>,
}

impl FieldErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    fn require(&mut self, field: &'static str, value: &str, message: &str) -> bool {
        if value.trim().is_empty() {
            self.push(field, message);
            false
        } else {
            true
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.iter().map(|(f, _)| *f)
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

fn looks_like_email(s: &str) -> bool {
    let s = s.trim();
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !s.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FieldErrors> {
        let mut errors = FieldErrors::default();
        errors.require("username", &self.username, "Username is required");
        errors.require("password", &self.password, "Password is required");
        errors.into_result(|| LoginRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub account_type: AccountType,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, FieldErrors> {
        let mut errors = FieldErrors::default();
        errors.require("first_name", &self.first_name, "First name is required");
        errors.require("last_name", &self.last_name, "Last name is required");
        if errors.require("username", &self.username, "Username is required")
            && self.username.trim().chars().count() < MIN_USERNAME_LEN
        {
            errors.push(
                "username",
                format!("Username must be at least {MIN_USERNAME_LEN} characters"),
            );
        }
        if errors.require("email", &self.email, "Email is required") && !looks_like_email(&self.email) {
            errors.push("email", "Please enter a valid email");
        }
        if errors.require("password", &self.password, "Password is required")
            && self.password.chars().count() < MIN_PASSWORD_LEN
        {
            errors.push(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            );
        }
        if self.password != self.confirm_password {
            errors.push("confirm_password", "Passwords do not match");
        }
        errors.into_result(|| RegisterRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            role: self.account_type,
        })
    }
}

/// Every shipping field except the country is required.
pub fn validate_shipping(info: &ShippingInfo) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    errors.require("first_name", &info.first_name, "First name is required");
    errors.require("last_name", &info.last_name, "Last name is required");
    if errors.require("email", &info.email, "Email is required") && !looks_like_email(&info.email) {
        errors.push("email", "Please enter a valid email");
    }
    errors.require("phone", &info.phone, "Phone is required");
    errors.require("address", &info.address, "Address is required");
    errors.require("city", &info.city, "City is required");
    errors.require("state", &info.state, "State is required");
    errors.require("zip_code", &info.zip_code, "ZIP code is required");
    errors.into_result(|| ())
}

/// Seller add/edit product form.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category_id: String,
    pub stock_quantity: String,
    pub weight: String,
    pub shipping_distance: String,
    pub carbon_footprint_score: String,
    pub eco_friendly: bool,
    pub image_url: String,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category_id: "1".to_string(),
            stock_quantity: String::new(),
            weight: "0.5".to_string(),
            shipping_distance: "50".to_string(),
            carbon_footprint_score: "0".to_string(),
            eco_friendly: false,
            image_url: String::new(),
        }
    }
}

fn parse_number(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
    label: &str,
    allow_zero: bool,
) -> f64 {
    let value = value.trim();
    if value.is_empty() {
        errors.push(field, format!("{label} is required"));
        return 0.0;
    }
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() && (n > 0.0 || (allow_zero && n == 0.0)) => n,
        _ => {
            let bound = if allow_zero { "zero or more" } else { "greater than zero" };
            errors.push(field, format!("{label} must be a number {bound}"));
            0.0
        }
    }
}

impl ProductForm {
    /// Prefill from an existing product for editing.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            category_id: product.category_id.unwrap_or(1).to_string(),
            stock_quantity: product.stock_quantity.to_string(),
            carbon_footprint_score: product.carbon_score.unwrap_or(0.0).to_string(),
            eco_friendly: product.is_eco_friendly,
            image_url: product.image_url.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<ProductPayload, FieldErrors> {
        let mut errors = FieldErrors::default();
        errors.require("name", &self.name, "Product name is required");
        let price = parse_number(&mut errors, "price", &self.price, "Price", false);
        let category_id = match self.category_id.trim().parse::<i64>() {
            Ok(id) if id > 0 => id,
            _ => {
                errors.push("category_id", "Choose a category");
                0
            }
        };
        let stock_quantity = match self.stock_quantity.trim().parse::<u32>() {
            Ok(n) => n,
            Err(_) if self.stock_quantity.trim().is_empty() => {
                errors.push("stock_quantity", "Stock quantity is required");
                0
            }
            Err(_) => {
                errors.push("stock_quantity", "Stock quantity must be a whole number");
                0
            }
        };
        let weight = parse_number(&mut errors, "weight", &self.weight, "Weight", false);
        let shipping_distance = parse_number(
            &mut errors,
            "shipping_distance",
            &self.shipping_distance,
            "Shipping distance",
            true,
        );
        let carbon_footprint_score = parse_number(
            &mut errors,
            "carbon_footprint_score",
            &self.carbon_footprint_score,
            "Carbon footprint score",
            true,
        );
        errors.into_result(|| ProductPayload {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            category_id,
            stock_quantity,
            weight,
            shipping_distance,
            carbon_footprint_score,
            eco_friendly: self.eco_friendly,
            image_url: self.image_url.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_both_fields() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(errors.get("username"), Some("Username is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));

        let ok = LoginForm {
            username: "  mira ".into(),
            password: "pw".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(ok.username, "mira");
    }

    #[test]
    fn test_register_field_by_field() {
        let form = RegisterForm {
            first_name: "Mira".into(),
            last_name: "".into(),
            username: "mi".into(),
            email: "mira@".into(),
            password: "12345".into(),
            confirm_password: "1234".into(),
            account_type: AccountType::Seller,
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["last_name", "username", "email", "password", "confirm_password"]
        );
        assert!(errors.get("first_name").is_none());
    }

    #[test]
    fn test_register_success_carries_account_type() {
        let form = RegisterForm {
            first_name: "Mira".into(),
            last_name: "Shah".into(),
            username: "mira".into(),
            email: "mira@eco.in".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            account_type: AccountType::Seller,
        };
        let req = form.validate().unwrap();
        assert_eq!(req.role, AccountType::Seller);
        assert_eq!(req.email, "mira@eco.in");
    }

    #[test]
    fn test_email_shapes() {
        assert!(looks_like_email("a@b.co"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.co"));
        assert!(!looks_like_email("a b@c.co"));
        assert!(!looks_like_email("a@.co"));
    }

    #[test]
    fn test_shipping_requires_everything_but_country() {
        let errors = validate_shipping(&ShippingInfo::default()).unwrap_err();
        assert_eq!(errors.len(), 8);
        assert!(errors.get("country").is_none());

        let info = ShippingInfo {
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            email: "a@r.in".into(),
            phone: "98765".into(),
            address: "12 Leaf St".into(),
            city: "Pune".into(),
            state: "MH".into(),
            zip_code: "411001".into(),
            ..ShippingInfo::default()
        };
        assert!(validate_shipping(&info).is_ok());
    }

    #[test]
    fn test_product_form_defaults_need_name_price_and_stock() {
        let errors = ProductForm::default().validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["name", "price", "stock_quantity"]);
    }

    #[test]
    fn test_product_form_parses_numbers() {
        let form = ProductForm {
            name: "Jute Bag".into(),
            price: "49.5".into(),
            stock_quantity: "10".into(),
            category_id: "2".into(),
            carbon_footprint_score: "1.2".into(),
            ..ProductForm::default()
        };
        let payload = form.validate().unwrap();
        assert_eq!(payload.price, 49.5);
        assert_eq!(payload.stock_quantity, 10);
        assert_eq!(payload.category_id, 2);
        assert_eq!(payload.weight, 0.5);
        assert_eq!(payload.shipping_distance, 50.0);

        let bad = ProductForm {
            price: "-3".into(),
            stock_quantity: "2.5".into(),
            ..form
        };
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.get("price"), Some("Price must be a number greater than zero"));
        assert_eq!(errors.get("stock_quantity"), Some("Stock quantity must be a whole number"));
    }
}
