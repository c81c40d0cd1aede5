//! `rainbow rgba`: print the 8-digit RGBA form of a colour.

use anyhow::{Result, anyhow};

use crate::color::HexColor;
use crate::form::Alpha;
use crate::form::validate::ALPHA_MESSAGE;

pub fn rgba(colour: &str, alpha: &str) -> Result<String> {
    let colour = HexColor::parse(colour)?;
    let alpha = Alpha::parse(alpha).ok_or_else(|| anyhow!("{ALPHA_MESSAGE} (got `{alpha}`)"))?;
    Ok(colour.to_rgba(alpha))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba() {
        assert_eq!(rgba("#123456", "0.42").unwrap(), "#1234566c");
        assert_eq!(rgba("#abc", "1").unwrap(), "#aabbccff");
    }

    #[test]
    fn test_rgba_errors() {
        let err = rgba("red", "0.5").unwrap_err();
        assert!(err.to_string().contains("not a #RGB or #RRGGBB colour"));

        let err = rgba("#000", "-0.1").unwrap_err();
        assert!(err.to_string().contains("between zero and one"));
    }
}
