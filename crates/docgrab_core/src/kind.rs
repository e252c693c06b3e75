use std::fmt;

/// The kinds of document the harvester collects from an index page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Pdf,
    Zip,
}

impl FileKind {
    /// Every kind, in the order a run processes them.
    pub const ALL: [FileKind; 2] = [FileKind::Pdf, FileKind::Zip];

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Zip => "zip",
        }
    }

    /// Directory name used under the output root.
    pub fn default_dir_name(self) -> &'static str {
        match self {
            FileKind::Pdf => "PDFs",
            FileKind::Zip => "ZIP",
        }
    }

    /// Media types whose presence in a Content-Type header marks a response as this kind.
    pub fn accepted_content_types(self) -> &'static [&'static str] {
        match self {
            FileKind::Pdf => &["application/pdf"],
            FileKind::Zip => &["application/zip", "application/octet-stream"],
        }
    }

    /// Substring match against the raw header value, so parameters such as
    /// `; charset=binary` do not matter. An empty header never matches.
    pub fn accepts_content_type(self, content_type: &str) -> bool {
        self.accepted_content_types()
            .iter()
            .any(|accepted| content_type.contains(accepted))
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Pdf => write!(f, "PDF"),
            FileKind::Zip => write!(f, "ZIP"),
        }
    }
}
