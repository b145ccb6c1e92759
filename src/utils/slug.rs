/// URL-friendly form of a name: lowercase ASCII words joined by `-`.
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| word.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Devworks Bootcamp"), "devworks-bootcamp");
        assert_eq!(slugify("  ModernTech -- Bootcamp! "), "moderntech-bootcamp");
        assert_eq!(slugify("UI/UX 101"), "ui-ux-101");
        assert_eq!(slugify(""), "");
    }
}
