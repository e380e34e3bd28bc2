/// Static files compiled into the binary and served under `/assets/`.
const ASSETS: &[(&str, &[u8])] = &[
    ("app.css", include_bytes!("../assets/app.css")),
    ("lendwise.svg", include_bytes!("../assets/lendwise.svg")),
];

pub(crate) struct Asset {
    pub(crate) bytes: &'static [u8],
    pub(crate) content_type: String,
}

pub(crate) fn lookup(name: &str) -> Option<Asset> {
    ASSETS
        .iter()
        .find(|(file, _)| *file == name)
        .map(|&(file, bytes)| Asset {
            bytes,
            content_type: mime_guess::from_path(file)
                .first_or_octet_stream()
                .to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_content_types_from_file_names() {
        let css = lookup("app.css").expect("stylesheet embedded");
        assert_eq!(css.content_type, "text/css");
        assert!(!css.bytes.is_empty());

        let logo = lookup("lendwise.svg").expect("logo embedded");
        assert_eq!(logo.content_type, "image/svg+xml");

        assert!(lookup("../Cargo.toml").is_none());
    }
}
