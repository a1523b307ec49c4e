use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::error::RenderError;

/// Families tried, in order, when the configured generic sans-serif family is
/// not installed.
const SANS_SERIF_FALLBACKS: &[&str] = &[
    "Arial",
    "Helvetica",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
    "Roboto",
    "Open Sans",
];

/// Manages font loading and retrieval using `fontdb` and `fontdue`.
///
/// This struct combines a database of available fonts (`fontdb`) with a cache of loaded
/// font instances (`fontdue`). Fonts are looked up by the identifiers used in graphic
/// settings (a family name, a generic family or a path to a font file) and the actual
/// font data is parsed lazily the first time a face is requested.
pub struct FontStorage {
    /// This is the font set that has been loaded by fontdb.
    font_db: fontdb::Database,
    /// This is the font that has been loaded by fontdue.
    /// Not all fonts in fontdb are necessarily loaded here.
    loaded_font: HashMap<fontdb::ID, Arc<fontdue::Font>, fxhash::FxBuildHasher>,
    /// Faces registered from explicit font file paths, keyed by that path.
    file_faces: HashMap<PathBuf, fontdb::ID, fxhash::FxBuildHasher>,
}

impl Default for FontStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl FontStorage {
    /// Creates a new empty font storage.
    pub fn new() -> Self {
        Self {
            font_db: fontdb::Database::new(),
            loaded_font: HashMap::with_hasher(fxhash::FxBuildHasher::default()),
            file_faces: HashMap::with_hasher(fxhash::FxBuildHasher::default()),
        }
    }
}

/// Loading fonts into fontdb and setting up fontdb.
impl FontStorage {
    /// Loads a font from binary data.
    pub fn load_font_binary(&mut self, data: impl Into<Vec<u8>>) {
        self.font_db.load_font_data(data.into());
        self.ensure_generic_families();
    }

    /// Loads a font from a file path.
    pub fn load_font_file(&mut self, path: PathBuf) -> Result<(), std::io::Error> {
        self.font_db.load_font_file(path)?;
        self.ensure_generic_families();
        Ok(())
    }

    /// Loads all fonts from a directory.
    pub fn load_fonts_dir(&mut self, dir: PathBuf) {
        self.font_db.load_fonts_dir(dir);
        self.ensure_generic_families();
    }

    /// Loads the system fonts.
    pub fn load_system_fonts(&mut self) {
        self.font_db.load_system_fonts();
        self.ensure_generic_families();
    }

    /// Checks if the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.font_db.is_empty()
    }

    /// Returns the number of loaded faces.
    pub fn len(&self) -> usize {
        self.font_db.len()
    }

    /// Sets the family name for the "sans-serif" generic family.
    pub fn set_sans_serif_family(&mut self, family: impl Into<String>) {
        self.font_db.set_sans_serif_family(family);
    }

    /// Returns the name of a family.
    pub fn family_name<'a>(&'a self, family: &'a fontdb::Family<'_>) -> &'a str {
        self.font_db.family_name(family)
    }

    /// Points the generic sans-serif family at an installed face when the
    /// fontdb default (Arial on most platforms) is missing.
    fn ensure_generic_families(&mut self) {
        if self.font_db.is_empty() {
            return;
        }

        let current = self.font_db.family_name(&fontdb::Family::SansSerif).to_string();
        if self.installed_family(&current).is_some() {
            return;
        }

        let replacement = SANS_SERIF_FALLBACKS
            .iter()
            .find_map(|name| self.installed_family(name))
            .or_else(|| {
                self.font_db
                    .faces()
                    .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
            });

        if let Some(name) = replacement {
            log::debug!("sans-serif family `{current}` is not installed, using `{name}`");
            self.font_db.set_sans_serif_family(name);
        }
    }

    /// Returns the exact spelling of an installed family, matched case-insensitively.
    fn installed_family(&self, name: &str) -> Option<String> {
        self.font_db.faces().find_map(|face| {
            face.families
                .iter()
                .find(|(family, _)| family.eq_ignore_ascii_case(name))
                .map(|(family, _)| family.clone())
        })
    }
}

/// Get `Font`
impl FontStorage {
    /// Resolves a font identifier from graphic settings.
    ///
    /// The identifier is tried as a path to a font file first, then as a generic
    /// family (`serif`, `sans-serif`, `monospace`, `cursive`, `fantasy`), then as a
    /// family name. A trailing `.ttf`/`.otf`/`.ttc` is ignored for the family
    /// lookup so `arial.ttf` finds the installed Arial.
    pub fn resolve(
        &mut self,
        identifier: &str,
    ) -> Result<(fontdb::ID, Arc<fontdue::Font>), RenderError> {
        let not_found = || RenderError::FontNotFound(identifier.to_string());

        let path = Path::new(identifier);
        if path.is_file() {
            let id = self.register_file(path).ok_or_else(not_found)?;
            return self.font(id).map(|font| (id, font)).ok_or_else(not_found);
        }

        let family_name = strip_font_extension(identifier);
        let generic = match family_name.to_ascii_lowercase().as_str() {
            "serif" => Some(fontdb::Family::Serif),
            "sans-serif" | "sans" => Some(fontdb::Family::SansSerif),
            "monospace" => Some(fontdb::Family::Monospace),
            "cursive" => Some(fontdb::Family::Cursive),
            "fantasy" => Some(fontdb::Family::Fantasy),
            _ => None,
        };

        let found = match generic {
            Some(family) => self.query_family(family),
            None => self.installed_family(family_name).and_then(|exact| {
                self.query_family(fontdb::Family::Name(exact.as_str()))
            }),
        };

        match found {
            Some(hit) => {
                log::debug!("resolved font `{identifier}` to face {:?}", hit.0);
                Ok(hit)
            }
            None => {
                log::warn!("font `{identifier}` not found among {} faces", self.len());
                Err(not_found())
            }
        }
    }

    fn query_family(
        &mut self,
        family: fontdb::Family<'_>,
    ) -> Option<(fontdb::ID, Arc<fontdue::Font>)> {
        let families = [family];
        let query = fontdb::Query {
            families: &families,
            weight: fontdb::Weight::NORMAL,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };
        self.query(&query)
    }

    fn register_file(&mut self, path: &Path) -> Option<fontdb::ID> {
        if let Some(id) = self.file_faces.get(path) {
            return Some(*id);
        }

        let ids = self
            .font_db
            .load_font_source(fontdb::Source::File(path.to_path_buf()));
        let id = ids.first().copied()?;
        self.file_faces.insert(path.to_path_buf(), id);
        self.ensure_generic_families();
        Some(id)
    }

    /// Queries for a font matching the description.
    ///
    /// Returns the ID and the loaded font if found.
    pub fn query(&mut self, query: &fontdb::Query) -> Option<(fontdb::ID, Arc<fontdue::Font>)> {
        let id = self.font_db.query(query)?;
        self.font(id).map(|font| (id, font))
    }

    /// Retrieves a loaded font by ID, loading it if necessary.
    pub fn font(&mut self, id: fontdb::ID) -> Option<Arc<fontdue::Font>> {
        use std::collections::hash_map::Entry;

        match self.loaded_font.entry(id) {
            Entry::Occupied(entry) => Some(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let font_result = self.font_db.with_face_data(id, |data, index| {
                    fontdue::Font::from_bytes(
                        data,
                        fontdue::FontSettings {
                            collection_index: index,
                            scale: 40.0,
                            load_substitutions: true,
                        },
                    )
                })?;

                match font_result {
                    Ok(font) => {
                        let r: &mut Arc<fontdue::Font> = entry.insert(Arc::new(font));
                        Some(Arc::clone(r))
                    }
                    Err(e) => {
                        log::error!("Failed to load font (id: {:?}): {}", id, e);
                        None
                    }
                }
            }
        }
    }

    /// Returns an iterator over all available faces.
    pub fn faces(&self) -> impl Iterator<Item = &fontdb::FaceInfo> {
        self.font_db.faces()
    }
}

fn strip_font_extension(identifier: &str) -> &str {
    let lower = identifier.to_ascii_lowercase();
    for ext in [".ttf", ".otf", ".ttc"] {
        if lower.ends_with(ext) {
            return &identifier[..identifier.len() - ext.len()];
        }
    }
    identifier
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_stripped_for_family_lookup() {
        assert_eq!(strip_font_extension("arial.ttf"), "arial");
        assert_eq!(strip_font_extension("Inkfree.TTF"), "Inkfree");
        assert_eq!(strip_font_extension("Noto Sans"), "Noto Sans");
        assert_eq!(strip_font_extension("fonts.otf"), "fonts");
    }

    #[test]
    fn empty_storage_reports_font_not_found() {
        let mut storage = FontStorage::new();
        let err = storage.resolve("arial.ttf").unwrap_err();
        assert!(matches!(err, RenderError::FontNotFound(name) if name == "arial.ttf"));
    }

    #[test]
    fn unparsable_font_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();

        let mut storage = FontStorage::new();
        let err = storage.resolve(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, RenderError::FontNotFound(_)));
    }

    #[test]
    fn system_sans_serif_resolves_when_fonts_are_installed() {
        let mut storage = FontStorage::new();
        storage.load_system_fonts();
        if storage.is_empty() {
            return;
        }
        assert!(storage.resolve("sans-serif").is_ok());
        assert!(storage.resolve("no such family, surely").is_err());
    }
}
