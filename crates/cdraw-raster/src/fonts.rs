//! Font faces for the raster backend.
//!
//! A [`FontBook`] maps a family name and [`FontStyle`] to a parsed `fontdue`
//! face. Families are matched case-insensitively; the first family ever
//! registered is the default, used for empty or generic names such as
//! `sans-serif`.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use cdraw_common::warn_once;
use cdraw_core::{FontStyle, ProviderError};
use fontdue::{Font, FontSettings};
use thiserror::Error;

/// Environment variable naming an extra font file to use as the default.
pub const FONT_ENV: &str = "CDRAW_FONT";

/// Family names that select the default family instead of a specific one.
const GENERIC_FAMILIES: &[&str] = &["", "default", "sans", "sans-serif", "system-ui"];

/// Well-known font files, probed in order by [`FontBook::system`].
///
/// Several paths may name the same face on different platforms; the first
/// one that loads wins.
const SYSTEM_FACES: &[(&str, FontStyle, &str)] = &[
    // Linux
    ("DejaVu Sans", FontStyle::Regular, "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
    ("DejaVu Sans", FontStyle::Regular, "/usr/share/fonts/TTF/DejaVuSans.ttf"),
    ("DejaVu Sans", FontStyle::Bold, "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"),
    ("DejaVu Sans", FontStyle::Bold, "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf"),
    ("DejaVu Sans", FontStyle::Italic, "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf"),
    ("DejaVu Sans", FontStyle::Italic, "/usr/share/fonts/TTF/DejaVuSans-Oblique.ttf"),
    ("DejaVu Sans", FontStyle::BoldItalic, "/usr/share/fonts/truetype/dejavu/DejaVuSans-BoldOblique.ttf"),
    ("DejaVu Sans", FontStyle::BoldItalic, "/usr/share/fonts/TTF/DejaVuSans-BoldOblique.ttf"),
    ("Liberation Sans", FontStyle::Regular, "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf"),
    ("Liberation Sans", FontStyle::Bold, "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf"),
    ("Liberation Sans", FontStyle::Italic, "/usr/share/fonts/truetype/liberation/LiberationSans-Italic.ttf"),
    ("Liberation Sans", FontStyle::BoldItalic, "/usr/share/fonts/truetype/liberation/LiberationSans-BoldItalic.ttf"),
    ("FreeSans", FontStyle::Regular, "/usr/share/fonts/truetype/freefont/FreeSans.ttf"),
    ("FreeSans", FontStyle::Bold, "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf"),
    ("FreeSans", FontStyle::Italic, "/usr/share/fonts/truetype/freefont/FreeSansOblique.ttf"),
    ("FreeSans", FontStyle::BoldItalic, "/usr/share/fonts/truetype/freefont/FreeSansBoldOblique.ttf"),
    // macOS
    ("Helvetica", FontStyle::Regular, "/System/Library/Fonts/Helvetica.ttc"),
    ("Arial", FontStyle::Regular, "/Library/Fonts/Arial.ttf"),
    ("Arial", FontStyle::Regular, "/System/Library/Fonts/Supplemental/Arial.ttf"),
    ("Arial", FontStyle::Bold, "/Library/Fonts/Arial Bold.ttf"),
    ("Arial", FontStyle::Bold, "/System/Library/Fonts/Supplemental/Arial Bold.ttf"),
    ("Arial", FontStyle::Italic, "/Library/Fonts/Arial Italic.ttf"),
    ("Arial", FontStyle::Italic, "/System/Library/Fonts/Supplemental/Arial Italic.ttf"),
    ("Arial", FontStyle::BoldItalic, "/Library/Fonts/Arial Bold Italic.ttf"),
    ("Arial", FontStyle::BoldItalic, "/System/Library/Fonts/Supplemental/Arial Bold Italic.ttf"),
    // Windows
    ("Arial", FontStyle::Regular, "C:\\Windows\\Fonts\\arial.ttf"),
    ("Arial", FontStyle::Bold, "C:\\Windows\\Fonts\\arialbd.ttf"),
    ("Arial", FontStyle::Italic, "C:\\Windows\\Fonts\\ariali.ttf"),
    ("Arial", FontStyle::BoldItalic, "C:\\Windows\\Fonts\\arialbi.ttf"),
];

/// Order in which faces are tried when the requested style is missing.
const fn fallback_chain(style: FontStyle) -> &'static [FontStyle] {
    match style {
        FontStyle::BoldItalic => &[
            FontStyle::BoldItalic,
            FontStyle::Bold,
            FontStyle::Italic,
            FontStyle::Regular,
        ],
        FontStyle::Bold => &[FontStyle::Bold, FontStyle::Regular],
        FontStyle::Italic => &[FontStyle::Italic, FontStyle::Regular],
        FontStyle::Regular => &[FontStyle::Regular],
    }
}

/// Failure to register a face.
#[derive(Debug, Error)]
pub enum FontLoadError {
    /// The font file could not be read.
    #[error("failed to read font '{}': {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The bytes are not a font `fontdue` can parse.
    #[error("failed to parse {style} face for '{family}': {reason}")]
    Parse {
        /// Family the face was registered under.
        family: String,
        /// Style the face was registered as.
        style: FontStyle,
        /// Parser message.
        reason: &'static str,
    },
}

#[derive(Clone)]
struct FontFamily {
    name: String,
    faces: HashMap<FontStyle, Font>,
}

impl fmt::Debug for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFamily")
            .field("name", &self.name)
            .field("styles", &self.faces.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Registry of font faces by family and style.
#[derive(Debug, Clone, Default)]
pub struct FontBook {
    families: Vec<FontFamily>,
}

impl FontBook {
    /// An empty book. Every text request fails until a face is added.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A book with every well-known system face that exists on this machine.
    ///
    /// Missing files are skipped silently. Files that exist but fail to
    /// parse produce a warning.
    #[must_use]
    pub fn system() -> Self {
        let mut book = Self::new();
        book.add_system_faces();
        if book.is_empty() {
            warn_once(
                "fonts",
                "no system font found; text needs a face registered with FontBook::add_face",
            );
        }
        book
    }

    /// [`FontBook::system`], preceded by the face named in `CDRAW_FONT`.
    ///
    /// The environment face is registered under its file stem and becomes
    /// the default family.
    #[must_use]
    pub fn from_env() -> Self {
        let mut book = Self::new();
        if let Some(path) = std::env::var_os(FONT_ENV).map(PathBuf::from) {
            let family = path
                .file_stem()
                .map_or_else(|| "default".to_string(), |s| s.to_string_lossy().into_owned());
            if let Err(e) = book.load_face(&family, FontStyle::Regular, &path) {
                warn_once("fonts", &format!("ignoring {FONT_ENV}: {e}"));
            }
        }
        book.add_system_faces();
        if book.is_empty() {
            warn_once(
                "fonts",
                &format!("no font found; set {FONT_ENV} to a .ttf or .otf file to render text"),
            );
        }
        book
    }

    /// Register `bytes` as the `style` face of `family`, replacing any face
    /// already registered there.
    ///
    /// # Errors
    ///
    /// Returns [`FontLoadError::Parse`] if `fontdue` rejects the data.
    pub fn add_face(
        &mut self,
        family: &str,
        style: FontStyle,
        bytes: Vec<u8>,
    ) -> Result<(), FontLoadError> {
        let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|reason| {
            FontLoadError::Parse {
                family: family.to_string(),
                style,
                reason,
            }
        })?;
        let index = self.position(family).unwrap_or_else(|| {
            self.families.push(FontFamily {
                name: family.to_string(),
                faces: HashMap::new(),
            });
            self.families.len() - 1
        });
        let _replaced = self.families[index].faces.insert(style, font);
        Ok(())
    }

    /// Read a font file and register it like [`FontBook::add_face`].
    ///
    /// # Errors
    ///
    /// Returns [`FontLoadError::Io`] if the file cannot be read, or
    /// [`FontLoadError::Parse`] if it is not a usable font.
    pub fn load_face(
        &mut self,
        family: &str,
        style: FontStyle,
        path: impl AsRef<Path>,
    ) -> Result<(), FontLoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| FontLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.add_face(family, style, bytes)
    }

    /// Whether no face has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Registered family names, default first.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.iter().map(|f| f.name.as_str())
    }

    /// Find the face for `family` and `style`.
    ///
    /// A missing style falls back along bold-italic, bold, italic, regular,
    /// then to whatever face the family has, with a one-time warning.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::FontResolution`] if no family matches.
    pub fn resolve(&self, family: &str, style: FontStyle) -> Result<&Font, ProviderError> {
        let unresolved = || ProviderError::FontResolution {
            family: family.to_string(),
            style,
        };
        let found = self
            .position(family)
            .or_else(|| {
                let generic = GENERIC_FAMILIES
                    .iter()
                    .any(|g| g.eq_ignore_ascii_case(family.trim()));
                (generic && !self.families.is_empty()).then_some(0)
            })
            .map(|index| &self.families[index])
            .ok_or_else(unresolved)?;

        if let Some(font) = found.faces.get(&style) {
            return Ok(font);
        }
        let (substitute, font) = fallback_chain(style)
            .iter()
            .skip(1)
            .chain(fallback_chain(FontStyle::BoldItalic))
            .find_map(|s| found.faces.get(s).map(|font| (*s, font)))
            .ok_or_else(unresolved)?;
        warn_once(
            "fonts",
            &format!(
                "'{}' has no {style} face; using {substitute}",
                found.name
            ),
        );
        Ok(font)
    }

    fn position(&self, family: &str) -> Option<usize> {
        let family = family.trim();
        self.families
            .iter()
            .position(|f| f.name.eq_ignore_ascii_case(family))
    }

    fn add_system_faces(&mut self) {
        for &(family, style, path) in SYSTEM_FACES {
            let taken = self
                .position(family)
                .is_some_and(|i| self.families[i].faces.contains_key(&style));
            if taken || !Path::new(path).exists() {
                continue;
            }
            if let Err(e) = self.load_face(family, style, path) {
                warn_once("fonts", &e.to_string());
            }
        }
    }
}
