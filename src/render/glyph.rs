use std::{collections::HashMap, sync::Arc};

use anyhow::Context;

use crate::{
    foundation::{
        core::Rgba8,
        error::{BoothError, BoothResult},
    },
    render::paint::premul_paint,
};

const EMOJI_FAMILIES: &str =
    "'Noto Color Emoji', 'Apple Color Emoji', 'Segoe UI Emoji', 'Twemoji Mozilla', sans-serif";

/// Raster box edge relative to the font size; leaves room for the outline blur.
const BOX_SCALE: f64 = 1.4;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct GlyphKey {
    glyph: String,
    size_px: u32,
    color: Rgba8,
    outline: bool,
}

/// Rasterized glyph ready to paint, centered in a square box.
#[derive(Clone)]
pub(crate) struct GlyphImage {
    pub(crate) paint: vello_cpu::Image,
    pub(crate) box_px: f64,
}

/// Emoji rasterizer backed by the system font database.
///
/// Glyphs are laid out as SVG text and rendered with resvg; results are cached per
/// glyph, size, color and outline flag.
#[derive(Default)]
pub(crate) struct GlyphAtlas {
    fontdb: Option<Arc<usvg::fontdb::Database>>,
    cache: HashMap<GlyphKey, GlyphImage>,
}

impl GlyphAtlas {
    fn fontdb(&mut self) -> Arc<usvg::fontdb::Database> {
        self.fontdb
            .get_or_insert_with(|| {
                let mut db = usvg::fontdb::Database::new();
                db.load_system_fonts();
                tracing::debug!(faces = db.len(), "loaded system fonts for glyphs");
                Arc::new(db)
            })
            .clone()
    }

    pub(crate) fn glyph(
        &mut self,
        glyph: &str,
        size_px: f64,
        color: Rgba8,
        outline: bool,
    ) -> BoothResult<GlyphImage> {
        let key = GlyphKey {
            glyph: glyph.to_owned(),
            size_px: size_px.round().clamp(1.0, 1024.0) as u32,
            color,
            outline,
        };
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit.clone());
        }

        let fontdb = self.fontdb();
        let image = rasterize_glyph(&key, fontdb)?;
        self.cache.insert(key, image.clone());
        Ok(image)
    }

    #[cfg(test)]
    pub(crate) fn cached(&self) -> usize {
        self.cache.len()
    }
}

fn glyph_svg(key: &GlyphKey, box_px: u32) -> String {
    let center = f64::from(box_px) / 2.0;
    let (filter_defs, filter_attr) = if key.outline {
        let blur = (f64::from(key.size_px) * 0.06).max(0.5);
        (
            format!(
                "<defs><filter id=\"o\" x=\"-25%\" y=\"-25%\" width=\"150%\" height=\"150%\">\
                 <feDropShadow dx=\"0\" dy=\"0\" stdDeviation=\"{blur:.2}\" \
                 flood-color=\"#000000\" flood-opacity=\"0.35\"/></filter></defs>"
            ),
            " filter=\"url(#o)\"",
        )
    } else {
        (String::new(), "")
    };
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{box_px}\" height=\"{box_px}\" \
         viewBox=\"0 0 {box_px} {box_px}\">{filter_defs}\
         <text x=\"{center}\" y=\"{center}\" font-size=\"{size}\" font-family=\"{EMOJI_FAMILIES}\" \
         text-anchor=\"middle\" dominant-baseline=\"central\" fill=\"{fill}\" \
         fill-opacity=\"{opacity:.3}\"{filter_attr}>{text}</text></svg>",
        size = key.size_px,
        fill = Rgba8 { a: 255, ..key.color }.to_hex(),
        opacity = f64::from(key.color.a) / 255.0,
        text = escape_xml(&key.glyph),
    )
}

fn rasterize_glyph(key: &GlyphKey, fontdb: Arc<usvg::fontdb::Database>) -> BoothResult<GlyphImage> {
    let box_px = (f64::from(key.size_px) * BOX_SCALE).ceil().max(1.0) as u32;
    let svg = glyph_svg(key, box_px);

    let opts = usvg::Options {
        fontdb,
        font_resolver: glyph_font_resolver(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(&svg, &opts).context("parse glyph svg")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(box_px, box_px)
        .ok_or_else(|| BoothError::render("failed to allocate glyph pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );
    if pixmap.data().chunks_exact(4).all(|px| px[3] == 0) {
        return Err(BoothError::render(format!(
            "no installed font covers glyph '{}'",
            key.glyph
        )));
    }

    Ok(GlyphImage {
        paint: premul_paint(pixmap.data(), box_px, box_px)?,
        box_px: f64::from(box_px),
    })
}

/// Face selection that never comes back empty while any font is installed.
///
/// The requested families are tried first, then the generic families, then the first
/// face in the database. Per-character fallback stays with usvg's default selector.
fn glyph_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);
            families.push(usvg::fontdb::Family::Serif);
            families.push(usvg::fontdb::Family::Monospace);

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style: usvg::fontdb::Style::Normal,
            };
            if let Some(id) = fontdb.query(&query) {
                return Some(id);
            }
            fontdb.faces().next().map(|f| f.id)
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
