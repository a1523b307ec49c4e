use std::path::{Path, PathBuf};

use image::RgbaImage;
use parking_lot::Mutex;

use crate::avatar::{AvatarLoader, FileAvatarLoader};
use crate::content::{PostContent, QuoteContent};
use crate::error::RenderError;
use crate::font_storage::FontStorage;
use crate::post::{ContentDimensions, HeaderMode, PostLayout, PostLayoutEngine};
use crate::renderer::{self, Canvas};
use crate::settings::{PostSettings, QuoteSettings};
use crate::text::{LayoutBlock, SizedFont, TextLayoutEngine};

/// High-level entry point: owns the fonts and runs both pipelines.
///
/// The font storage sits behind a `Mutex` so one `FontSystem` can serve
/// renders from several threads. The lock is only held while a font is
/// resolved; layout and drawing run without it, each render on its own
/// canvas.
pub struct FontSystem {
    /// The underlying font storage.
    pub font_storage: Mutex<FontStorage>,
    avatar_loader: Box<dyn AvatarLoader + Send + Sync>,
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FontSystem {
    /// Creates a system with no fonts that reads avatars from disk.
    pub fn new() -> Self {
        Self::with_avatar_loader(FileAvatarLoader)
    }

    /// Creates a system with no fonts that loads avatars through `loader`.
    pub fn with_avatar_loader(loader: impl AvatarLoader + Send + Sync + 'static) -> Self {
        Self {
            font_storage: Mutex::new(FontStorage::new()),
            avatar_loader: Box::new(loader),
        }
    }
}

/// font storage initialization
impl FontSystem {
    /// Loads the system fonts into the storage.
    pub fn load_system_fonts(&self) {
        self.font_storage.lock().load_system_fonts();
    }

    /// Loads a font from binary data.
    pub fn load_font_binary(&self, data: impl Into<Vec<u8>>) {
        self.font_storage.lock().load_font_binary(data);
    }

    /// Loads a font from a file path.
    pub fn load_font_file(&self, path: PathBuf) -> Result<(), std::io::Error> {
        self.font_storage.lock().load_font_file(path)
    }

    /// Loads all fonts from a directory.
    pub fn load_fonts_dir(&self, dir: PathBuf) {
        self.font_storage.lock().load_fonts_dir(dir)
    }

    /// Picks the family `sans-serif` resolves to.
    pub fn set_sans_serif_family(&self, family: impl Into<String>) {
        self.font_storage.lock().set_sans_serif_family(family);
    }

    /// Resolves `identifier` (file path, generic family or family name) at
    /// `px` pixels.
    pub fn sized_font(&self, identifier: &str, px: f32) -> Result<SizedFont, RenderError> {
        let (id, font) = self.font_storage.lock().resolve(identifier)?;
        Ok(SizedFont::new(id, font, px))
    }
}

/// quote/lyric pipeline
impl FontSystem {
    /// Lays out a quote without drawing it.
    pub fn layout_quote(
        &self,
        content: &QuoteContent,
        settings: &QuoteSettings,
    ) -> Result<(LayoutBlock, SizedFont), RenderError> {
        let font = self.sized_font(settings.font_family(), settings.font_size())?;
        let engine =
            TextLayoutEngine::new(settings.canvas(), settings.wrap_limit(), settings.margin());
        let layout = engine.layout(content.text(), &font)?;
        Ok((layout, font))
    }

    /// Draws a quote and returns the image without writing it anywhere.
    pub fn quote_image(
        &self,
        content: &QuoteContent,
        settings: &QuoteSettings,
    ) -> Result<RgbaImage, RenderError> {
        Ok(self.draw_quote(content, settings)?.into_image())
    }

    /// Draws a quote and saves it as `<title>.png` under `out_dir` (current
    /// directory when `None`). Returns the written path.
    pub fn render_quote(
        &self,
        content: &QuoteContent,
        settings: &QuoteSettings,
        out_dir: Option<&Path>,
    ) -> Result<PathBuf, RenderError> {
        let canvas = self.draw_quote(content, settings)?;
        let path = renderer::output_path(out_dir, content.title());
        save(&canvas, out_dir, &path)?;
        log::info!("rendered quote `{}` to {}", content.title(), path.display());
        Ok(path)
    }

    fn draw_quote(
        &self,
        content: &QuoteContent,
        settings: &QuoteSettings,
    ) -> Result<Canvas, RenderError> {
        let (layout, font) = self.layout_quote(content, settings)?;
        Ok(renderer::draw_quote(
            &layout,
            &font,
            settings.canvas(),
            settings.colors(),
        ))
    }
}

/// Everything a post render needs, gathered before any drawing.
struct PreparedPost {
    layout: PostLayout,
    avatar: Option<RgbaImage>,
    header_font: SizedFont,
    text_font: SizedFont,
}

/// post pipeline
impl FontSystem {
    fn post_fonts(&self, settings: &PostSettings) -> Result<(SizedFont, SizedFont), RenderError> {
        Ok((
            self.sized_font(settings.font_family(), settings.font_size_header())?,
            self.sized_font(settings.font_family(), settings.font_size_text())?,
        ))
    }

    fn header_mode(content: &PostContent, settings: &PostSettings) -> HeaderMode {
        HeaderMode::from_avatar_size(content.avatar().map(|_| settings.profile_pic_side()))
    }

    /// Header and body footprints of a post.
    pub fn post_dimensions(
        &self,
        content: &PostContent,
        settings: &PostSettings,
    ) -> Result<ContentDimensions, RenderError> {
        let (header_font, text_font) = self.post_fonts(settings)?;
        let dimensions = PostLayoutEngine::from_settings(settings).content_dimensions(
            content,
            Self::header_mode(content, settings),
            &header_font,
            &text_font,
        )?;
        Ok(dimensions)
    }

    /// Lays out a post without drawing it.
    pub fn layout_post(
        &self,
        content: &PostContent,
        settings: &PostSettings,
    ) -> Result<PostLayout, RenderError> {
        let (header_font, text_font) = self.post_fonts(settings)?;
        let layout = PostLayoutEngine::from_settings(settings).layout(
            content,
            Self::header_mode(content, settings),
            &header_font,
            &text_font,
        )?;
        Ok(layout)
    }

    fn prepare_post(
        &self,
        content: &PostContent,
        settings: &PostSettings,
    ) -> Result<PreparedPost, RenderError> {
        let (header_font, text_font) = self.post_fonts(settings)?;
        let mode = Self::header_mode(content, settings);

        let avatar = match (content.avatar(), mode) {
            (Some(source), HeaderMode::WithAvatar { size }) => {
                Some(self.avatar_loader.load_and_mask(source, size)?)
            }
            _ => None,
        };

        let layout = PostLayoutEngine::from_settings(settings).layout(
            content,
            mode,
            &header_font,
            &text_font,
        )?;

        Ok(PreparedPost {
            layout,
            avatar,
            header_font,
            text_font,
        })
    }

    fn draw_post(
        &self,
        content: &PostContent,
        settings: &PostSettings,
    ) -> Result<Canvas, RenderError> {
        let prepared = self.prepare_post(content, settings)?;
        Ok(renderer::draw_post(
            &prepared.layout,
            prepared.avatar.as_ref(),
            &prepared.header_font,
            &prepared.text_font,
            settings.canvas(),
            settings.colors(),
        ))
    }

    /// Draws a post and returns the image without writing it anywhere.
    pub fn post_image(
        &self,
        content: &PostContent,
        settings: &PostSettings,
    ) -> Result<RgbaImage, RenderError> {
        Ok(self.draw_post(content, settings)?.into_image())
    }

    /// Draws a post and saves it as `<post name>.png` under `out_dir`
    /// (current directory when `None`). Returns the written path.
    pub fn render_post(
        &self,
        content: &PostContent,
        settings: &PostSettings,
        out_dir: Option<&Path>,
    ) -> Result<PathBuf, RenderError> {
        let canvas = self.draw_post(content, settings)?;
        let path = renderer::output_path(out_dir, content.name());
        save(&canvas, out_dir, &path)?;
        log::info!("rendered post `{}` to {}", content.name(), path.display());
        Ok(path)
    }
}

fn save(canvas: &Canvas, out_dir: Option<&Path>, path: &Path) -> Result<(), RenderError> {
    if let Some(dir) = out_dir {
        std::fs::create_dir_all(dir).map_err(|source| RenderError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    canvas.save(path)
}
