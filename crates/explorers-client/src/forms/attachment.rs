//! Attachment - a file picked in an edit form, before upload

use base64::Engine;

use crate::transport::FilePart;

const IMAGE_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/gif", "image/webp"];

#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Content type guessed from the file extension
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Keep the type the browser reported, falling back to a guess
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        let content_type = content_type.into();
        if !content_type.trim().is_empty() {
            self.content_type = content_type;
        }
        self
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn validate(&self, max_bytes: usize) -> Result<(), String> {
        if !IMAGE_TYPES.contains(&self.content_type.as_str()) {
            return Err(format!(
                "{} is not a supported image (PNG, JPEG, GIF or WebP)",
                self.file_name
            ));
        }
        if self.bytes.is_empty() {
            return Err(format!("{} is empty", self.file_name));
        }
        if self.bytes.len() > max_bytes {
            return Err(format!(
                "{} is larger than {} KiB",
                self.file_name,
                max_bytes / 1024
            ));
        }
        Ok(())
    }

    /// `data:` URL for the local preview
    pub fn preview_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }

    pub fn to_part(&self, field: &str) -> FilePart {
        FilePart {
            field: field.to_string(),
            file_name: self.file_name.clone(),
            content_type: self.content_type.clone(),
            bytes: self.bytes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_is_guessed_from_extension() {
        assert_eq!(Attachment::new("badge.PNG", vec![1]).content_type, "image/png");
        assert_eq!(Attachment::new("photo.jpg", vec![1]).content_type, "image/jpeg");
        assert_eq!(
            Attachment::new("notes", vec![1]).content_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn rejects_non_images_and_oversized_files() {
        assert!(Attachment::new("icon.webp", vec![0; 10]).validate(1024).is_ok());
        assert!(Attachment::new("notes.pdf", vec![0; 10]).validate(1024).is_err());
        let err = Attachment::new("big.png", vec![0; 2048]).validate(1024).unwrap_err();
        assert!(err.contains("1 KiB"));
    }

    #[test]
    fn preview_is_a_base64_data_url() {
        let attachment = Attachment::new("dot.gif", b"GIF".to_vec());
        assert_eq!(attachment.preview_data_url(), "data:image/gif;base64,R0lG");
    }
}
