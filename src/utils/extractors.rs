use axum::{
    extract::{Multipart, multipart::MultipartError},
    http::StatusCode,
};

use crate::models::{ImageUpload, ProductRequest};

const PRODUCT_PART: &str = "product";
const IMAGE_PART: &str = "imageFile";

/// A create or update form: the JSON `product` part and the `imageFile` part.
#[derive(Debug)]
pub struct ProductForm {
    pub product: ProductRequest,
    pub image: ImageUpload,
}

#[derive(Debug)]
pub enum FormError {
    /// The form itself is unusable: missing part, bad JSON, broken framing.
    Malformed(String),
    /// The image part was announced but its bytes could not be read.
    Upload(String),
}

// Only framing errors are the client's fault; a body that breaks off or
// exceeds the size limit is an upload failure.
fn classify(err: MultipartError, context: &str) -> FormError {
    let status = err.status();
    let msg = format!("{}: {} ({})", context, err.body_text(), status);

    if status == StatusCode::BAD_REQUEST {
        FormError::Malformed(msg)
    } else {
        FormError::Upload(msg)
    }
}

pub async fn extract_product_form(mut multipart: Multipart) -> Result<ProductForm, FormError> {
    let mut product: Option<ProductRequest> = None;
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| classify(e, "Failed to read multipart field"))?
    {
        let name = field.name().map(str::to_string);

        match name.as_deref() {
            Some(PRODUCT_PART) => {
                let raw = field
                    .bytes()
                    .await
                    .map_err(|e| classify(e, "Failed to read product part"))?;
                let parsed = serde_json::from_slice::<ProductRequest>(&raw)
                    .map_err(|e| FormError::Malformed(format!("Invalid product payload: {}", e)))?;
                product = Some(parsed);
            }
            Some(IMAGE_PART) => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| FormError::Upload(format!("Failed to read image file: {}", e)))?;

                image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            other => {
                tracing::debug!("Ignoring multipart field {:?}", other);
            }
        }
    }

    let product =
        product.ok_or_else(|| FormError::Malformed("Missing 'product' part".to_string()))?;
    let image = image.ok_or_else(|| FormError::Malformed("Missing 'imageFile' part".to_string()))?;

    Ok(ProductForm { product, image })
}
