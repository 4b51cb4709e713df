/// File categorization by extension.
///
/// This module maps file extensions to broad categories (e.g. "Images",
/// "Documents") which double as the names of the folders files are sorted into.
/// Lookups are case-insensitive and total: anything unrecognized is `Other`.
///
/// # Examples
///
/// ```
/// use declutter::file_category::{Category, categorize};
/// use std::path::Path;
///
/// assert_eq!(categorize(Path::new("photo.JPG")), Category::Image);
/// assert_eq!(categorize(Path::new("report.pdf")), Category::Document);
/// assert_eq!(categorize(Path::new("unknown.xyz")), Category::Other);
/// ```
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

/// Represents a broad file category.
///
/// Each category owns one destination folder under the output root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Image files (JPG, PNG, GIF, etc.)
    #[serde(rename = "Images", alias = "images", alias = "Image")]
    Image,
    /// Document files (PDF, DOCX, TXT, etc.)
    #[serde(rename = "Documents", alias = "documents", alias = "Document")]
    Document,
    /// Archive files (ZIP, TAR, GZ, etc.)
    #[serde(rename = "Archives", alias = "archives", alias = "Archive")]
    Archive,
    /// Audio files (MP3, WAV, etc.)
    #[serde(rename = "Audio", alias = "audio")]
    Audio,
    /// Video files (MP4, MOV, etc.)
    #[serde(rename = "Video", alias = "video")]
    Video,
    /// Source code and notebooks
    #[serde(rename = "Code", alias = "code")]
    Code,
    /// Unknown or uncategorized files
    #[serde(rename = "Other", alias = "other")]
    Other,
}

impl Category {
    /// Returns the folder name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use declutter::file_category::Category;
    ///
    /// assert_eq!(Category::Image.dir_name(), "Images");
    /// assert_eq!(Category::Other.dir_name(), "Other");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Image => "Images",
            Category::Document => "Documents",
            Category::Archive => "Archives",
            Category::Audio => "Audio",
            Category::Video => "Video",
            Category::Code => "Code",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// The mapper used by [`categorize`], holding only the standard table.
static STANDARD_MAPPER: LazyLock<FileMapper> = LazyLock::new(FileMapper::new);

/// Returns the category for `path` using the standard extension table.
///
/// The path does not need to exist.
pub fn categorize(path: &Path) -> Category {
    STANDARD_MAPPER.categorize(path)
}

/// Maps file extensions to categories.
///
/// Starts out with the standard table and can be extended with custom
/// mappings, e.g. from the `[categories]` table of the configuration file.
#[derive(Debug, Clone)]
pub struct FileMapper {
    extension_map: HashMap<String, Category>,
}

impl FileMapper {
    /// Creates a new `FileMapper` with all standard mappings.
    pub fn new() -> Self {
        let mut mapper = Self {
            extension_map: HashMap::new(),
        };
        mapper.populate_standard_mappings();
        mapper
    }

    fn populate_standard_mappings(&mut self) {
        const STANDARD: &[(Category, &[&str])] = &[
            (Category::Image, &["jpg", "jpeg", "png", "gif"]),
            (Category::Document, &["pdf", "docx", "txt"]),
            (Category::Archive, &["zip", "tar", "gz"]),
            (Category::Audio, &["mp3", "wav"]),
            (Category::Video, &["mp4", "mov"]),
            (Category::Code, &["py", "ipynb"]),
        ];

        for (category, extensions) in STANDARD {
            for ext in *extensions {
                self.add_extension_mapping(ext, *category);
            }
        }
    }

    /// Adds (or replaces) a file extension to category mapping.
    ///
    /// A leading dot is ignored, so `".psd"` and `"psd"` are equivalent.
    pub fn add_extension_mapping(&mut self, ext: &str, category: Category) {
        let ext = ext.trim_start_matches('.');
        self.extension_map.insert(ext.to_lowercase(), category);
    }

    /// Maps a bare file extension to a category.
    ///
    /// # Examples
    ///
    /// ```
    /// use declutter::file_category::{Category, FileMapper};
    ///
    /// let mapper = FileMapper::default();
    /// assert_eq!(mapper.extension_to_category("PNG"), Some(Category::Image));
    /// assert_eq!(mapper.extension_to_category("xyz"), None);
    /// ```
    pub fn extension_to_category(&self, ext: &str) -> Option<Category> {
        self.extension_map.get(&ext.to_lowercase()).copied()
    }

    /// Determines the category of a file from the extension of its path.
    ///
    /// Files without an extension, or with an unknown one, are `Other`.
    pub fn categorize(&self, path: &Path) -> Category {
        path.extension()
            .and_then(|ext| self.extension_to_category(&ext.to_string_lossy()))
            .unwrap_or(Category::Other)
    }
}

impl Default for FileMapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_dir_names() {
        assert_eq!(Category::Image.dir_name(), "Images");
        assert_eq!(Category::Document.dir_name(), "Documents");
        assert_eq!(Category::Archive.dir_name(), "Archives");
        assert_eq!(Category::Audio.dir_name(), "Audio");
        assert_eq!(Category::Video.dir_name(), "Video");
        assert_eq!(Category::Code.dir_name(), "Code");
        assert_eq!(Category::Other.dir_name(), "Other");
    }

    #[test]
    fn test_categorize_basic() {
        assert_eq!(categorize(Path::new("photo.JPG")), Category::Image);
        assert_eq!(categorize(Path::new("report.pdf")), Category::Document);
        assert_eq!(categorize(Path::new("unknown.xyz")), Category::Other);
    }

    #[test]
    fn test_categorize_case_insensitive() {
        assert_eq!(categorize(Path::new("a.PnG")), Category::Image);
        assert_eq!(categorize(Path::new("b.Mp3")), Category::Audio);
        assert_eq!(categorize(Path::new("notebook.IPYNB")), Category::Code);
    }

    #[test]
    fn test_categorize_without_extension() {
        assert_eq!(categorize(Path::new("Makefile")), Category::Other);
        assert_eq!(categorize(Path::new(".bashrc")), Category::Other);
        assert_eq!(categorize(Path::new("trailing.")), Category::Other);
        assert_eq!(categorize(Path::new("")), Category::Other);
    }

    #[test]
    fn test_unlisted_extensions_are_other() {
        // Only the fixed table is built in; anything else needs a [categories] entry
        for name in ["notes.md", "logo.svg", "main.rs", "track.flac", "a.7z", "b.doc"] {
            assert_eq!(categorize(Path::new(name)), Category::Other, "{}", name);
        }
    }

    #[test]
    fn test_categorize_uses_last_extension() {
        assert_eq!(categorize(Path::new("backup.tar.gz")), Category::Archive);
        assert_eq!(categorize(Path::new("notes.pdf.mov")), Category::Video);
    }

    #[test]
    fn test_categorize_ignores_directories_in_path() {
        assert_eq!(
            categorize(Path::new("/home/user/photos.d/readme")),
            Category::Other
        );
        assert_eq!(
            categorize(Path::new("some/dir.zip/song.wav")),
            Category::Audio
        );
    }

    #[test]
    fn test_custom_mapping() {
        let mut mapper = FileMapper::default();
        mapper.add_extension_mapping(".PSD", Category::Image);
        mapper.add_extension_mapping("txt", Category::Code);

        assert_eq!(mapper.categorize(Path::new("art.psd")), Category::Image);
        assert_eq!(mapper.categorize(Path::new("notes.txt")), Category::Code);
        // The standard mapper is untouched
        assert_eq!(categorize(Path::new("notes.txt")), Category::Document);
    }

    #[test]
    fn test_category_deserializes_from_dir_name() {
        #[derive(Deserialize)]
        struct Wrapper {
            category: Category,
        }

        let parsed: Wrapper = toml::from_str("category = \"Images\"").unwrap();
        assert_eq!(parsed.category, Category::Image);
        let parsed: Wrapper = toml::from_str("category = \"code\"").unwrap();
        assert_eq!(parsed.category, Category::Code);
    }
}
