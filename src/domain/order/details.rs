//! Delivery details entered at the order-form step, and their validation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A screenshot of the delivery address, already read into memory by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressImage {
    pub mime_type: String,
    /// Encoded image payload, typically a `data:` URL.
    pub data: String,
}

impl AddressImage {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// Payload of the order-form step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub delivery_address: String,
    pub wechat_id: String,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_image: Option<AddressImage>,
}

impl DeliveryDetails {
    pub fn new(delivery_address: impl Into<String>, wechat_id: impl Into<String>) -> Self {
        Self {
            delivery_address: delivery_address.into(),
            wechat_id: wechat_id.into(),
            ..Self::default()
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_address_image(mut self, image: AddressImage) -> Self {
        self.address_image = Some(image);
        self
    }

    /// Check required fields and return the details with them trimmed.
    ///
    /// Every problem is reported, not just the first.
    pub fn validate(self) -> Result<Self, DetailsValidationError> {
        let mut errors: Vec<DetailsValidationError> = Vec::new();

        let delivery_address = self.delivery_address.trim().to_string();
        if delivery_address.is_empty() {
            errors.push(DetailsValidationError::MissingDeliveryAddress);
        }

        let wechat_id = self.wechat_id.trim().to_string();
        if wechat_id.is_empty() {
            errors.push(DetailsValidationError::MissingWechatId);
        }

        if let Some(image) = &self.address_image {
            if !image.is_image() {
                errors.push(DetailsValidationError::UnsupportedImageType(
                    image.mime_type.clone(),
                ));
            }
        }

        match errors.len() {
            0 => Ok(Self {
                delivery_address,
                wechat_id,
                note: self.note,
                address_image: self.address_image,
            }),
            1 => Err(errors.remove(0)),
            _ => Err(DetailsValidationError::Multiple(errors)),
        }
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DetailsValidationError {
    Multiple(Vec<DetailsValidationError>),
    MissingDeliveryAddress,
    MissingWechatId,
    UnsupportedImageType(String),
}

impl DetailsValidationError {
    /// The individual problems, flattened.
    pub fn errors(&self) -> Vec<&DetailsValidationError> {
        match self {
            DetailsValidationError::Multiple(errors) => {
                errors.iter().flat_map(|e| e.errors()).collect()
            }
            other => vec![other],
        }
    }
}

impl fmt::Display for DetailsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailsValidationError::Multiple(errors) => {
                writeln!(f, "Delivery details errors:")?;
                for err in errors {
                    writeln!(f, "  - {}", err)?;
                }
                Ok(())
            }
            DetailsValidationError::MissingDeliveryAddress => {
                write!(f, "Missing delivery address")
            }
            DetailsValidationError::MissingWechatId => write!(f, "Missing WeChat ID"),
            DetailsValidationError::UnsupportedImageType(mime) => {
                write!(f, "Address attachment is not an image: {}", mime)
            }
        }
    }
}

impl std::error::Error for DetailsValidationError {}
