use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

use crate::errors::ViewError;
use crate::render::chart::{Chart, ChartId, Legend};
use crate::render::nav::NavState;
use crate::render::table::Table;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Containers on the page the renderer writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Region {
    Chart,
    Analysis,
    Legend,
    Quiz,
}

impl Region {
    pub fn selector(&self) -> &'static str {
        match self {
            Region::Chart => "#chartContainer",
            Region::Analysis => "#a_data",
            Region::Legend => "#legendContainer",
            Region::Quiz => "#quizContainer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ObserverId(pub u64);

/// Inline raster image, e.g. the max pain distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub mime: &'static str,
    pub base64: String,
    pub alt: &'static str,
    pub class: &'static str,
    pub byte_len: usize,
}

impl Image {
    pub fn png(base64: &str, alt: &'static str) -> Result<Self, ViewError> {
        let bytes = STANDARD
            .decode(base64.trim())
            .map_err(|e| ViewError::InvalidImage(e.to_string()))?;
        if !bytes.starts_with(&PNG_SIGNATURE) {
            return Err(ViewError::InvalidImage("data is not a PNG".to_string()));
        }

        Ok(Self {
            mime: "image/png",
            base64: base64.trim().to_string(),
            alt,
            class: "img-fluid",
            byte_len: bytes.len(),
        })
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.base64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    Table(Table),
    Chart(Chart),
    Image(Image),
    Legend(Legend),
}

/// Whatever the views are drawn on: a browser page, a terminal, a test double.
pub trait Surface {
    /// Remove every child of `region`.
    fn clear(&mut self, region: Region);

    fn append(&mut self, region: Region, node: Node);

    /// Blocking, modal message.
    fn alert(&mut self, message: &str);

    /// Inline error region; `None` hides it.
    fn set_error(&mut self, message: Option<&str>);

    fn nav_mut(&mut self) -> &mut NavState;

    /// Keep the chart's size in step with its container until disconnected.
    fn observe_resize(&mut self, region: Region, chart: ChartId) -> ObserverId;

    fn disconnect(&mut self, observer: ObserverId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_image_decodes() {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(b"rest-of-image");
        let encoded = STANDARD.encode(&bytes);

        let image = Image::png(&encoded, "Max Pain distribution").unwrap();
        assert_eq!(image.byte_len, bytes.len());
        assert!(image.data_uri().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_invalid_base64_is_rejected() {
        let err = Image::png("not base64 !!", "x").unwrap_err();
        assert!(matches!(err, ViewError::InvalidImage(_)));
    }

    #[test]
    fn test_non_png_is_rejected() {
        let encoded = STANDARD.encode(b"GIF89a....");
        assert!(Image::png(&encoded, "x").is_err());
    }
}
