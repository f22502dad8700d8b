//! Image localization.
//!
//! Scans article HTML for `<img>` elements, downloads each referenced
//! image, shrinks it for e-reader screens, registers it as a packaged
//! asset, and rewrites the HTML to point at the bundled copy, centered.
//!
//! The work runs in three phases so no parse tree is held across network
//! awaits: discover references, fetch and transcode, then a single
//! visit-and-replace serialization pass. Every per-image failure is
//! isolated — a broken image never loses the rest of the entry.

use std::collections::HashMap;
use std::sync::Arc;

use ego_tree::NodeRef;
use scraper::node::Element;
use scraper::{Html, Node, Selector};
use url::Url;

use crate::book::{AssetSink, PackagedAsset};
use crate::fetcher::Fetcher;
use crate::imaging;
use crate::markup;

/// An `<img>` reference discovered in entry HTML.
#[derive(Debug, Clone)]
struct DiscoveredImage {
    /// Effective absolute source, if any.
    url: Option<String>,
    alt: String,
}

/// A successfully packaged image, keyed by its discovery index.
#[derive(Debug, Clone)]
struct LocalizedImage {
    file_name: String,
    alt: String,
}

impl LocalizedImage {
    fn markup(&self) -> String {
        let alt = html_escape::encode_safe(&self.alt);
        format!(
            "<div class=\"image-container\" style=\"text-align: center; margin: 1em 0;\">\
             <img src=\"images/{file}\" alt=\"{alt}\" \
             style=\"max-width: 100%; height: auto; display: block; margin: 0 auto;\"/></div>",
            file = self.file_name
        )
    }
}

pub struct Localizer {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
}

impl Localizer {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self { fetcher }
    }

    /// Localize every resolvable image in `html`, registering one asset per
    /// image with the sink. `name_prefix` must be unique per call within
    /// one document; asset names are `image_{name_prefix}_{i}`.
    ///
    /// Images without a resolvable URL and images whose download fails are
    /// left untouched in the output.
    pub async fn localize(
        &self,
        html: &str,
        sink: &mut dyn AssetSink,
        name_prefix: &str,
    ) -> String {
        let images = discover_images(html);
        if images.is_empty() {
            return html.to_string();
        }

        let mut replacements = HashMap::new();
        for (index, image) in images.iter().enumerate() {
            let Some(url) = &image.url else {
                tracing::debug!(prefix = name_prefix, index, "image without resolvable URL");
                continue;
            };

            tracing::info!(%url, "downloading image");
            let bytes = match self.fetcher.fetch_image(url).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!(%url, error = %e, "image fetch failed, leaving reference");
                    continue;
                }
            };

            let (data, extension, media_type) = match imaging::shrink(&bytes) {
                Ok(out) => (out.data, out.extension, out.media_type),
                Err(e) => {
                    tracing::warn!(%url, error = %e, "transcode failed, packaging original bytes");
                    (bytes, "jpg", "image/jpeg")
                }
            };

            let file_name = format!("image_{name_prefix}_{index}.{extension}");
            let asset = PackagedAsset {
                id: format!("image_{name_prefix}_{index}"),
                href: format!("images/{file_name}"),
                media_type: media_type.to_string(),
                data,
            };
            if let Err(e) = sink.register(asset) {
                tracing::warn!(%url, error = %e, "asset registration failed");
                continue;
            }

            replacements.insert(
                index,
                LocalizedImage {
                    file_name,
                    alt: image.alt.clone(),
                },
            );
        }

        if replacements.is_empty() {
            return html.to_string();
        }
        rewrite(html, &replacements)
    }
}

fn discover_images(html: &str) -> Vec<DiscoveredImage> {
    let doc = Html::parse_fragment(html);
    let selector = Selector::parse("img").unwrap();
    doc.select(&selector)
        .map(|element| DiscoveredImage {
            url: effective_url(element.value()),
            alt: element.value().attr("alt").unwrap_or("").to_string(),
        })
        .collect()
}

/// `src` when absolute, else an absolute `data-src` (lazy loading), else none.
fn effective_url(img: &Element) -> Option<String> {
    ["src", "data-src"]
        .into_iter()
        .filter_map(|name| img.attr(name))
        .find(|value| is_absolute(value))
        .map(String::from)
}

fn is_absolute(value: &str) -> bool {
    matches!(Url::parse(value), Ok(url) if matches!(url.scheme(), "http" | "https"))
}

/// Re-serialize the fragment, swapping localized `<img>` elements for their
/// centered local replacements. Image counting follows the same document
/// order as [`discover_images`].
fn rewrite(html: &str, replacements: &HashMap<usize, LocalizedImage>) -> String {
    let doc = Html::parse_fragment(html);
    let mut rewriter = Rewriter {
        replacements,
        next_image: 0,
        out: String::new(),
    };
    for node in markup::fragment_children(&doc) {
        rewriter.walk(node);
    }
    rewriter.out
}

struct Rewriter<'a> {
    replacements: &'a HashMap<usize, LocalizedImage>,
    next_image: usize,
    out: String,
}

impl Rewriter<'_> {
    fn walk(&mut self, node: NodeRef<Node>) {
        match node.value() {
            Node::Element(el) if el.name() == "img" => {
                let index = self.next_image;
                self.next_image += 1;
                match self.replacements.get(&index) {
                    Some(replacement) => self.out.push_str(&replacement.markup()),
                    None => markup::write_open_tag(&mut self.out, &el),
                }
            }
            Node::Element(el) => {
                markup::write_open_tag(&mut self.out, &el);
                if !markup::is_void(el.name()) {
                    for child in node.children() {
                        self.walk(child);
                    }
                    markup::write_close_tag(&mut self.out, &el);
                }
            }
            Node::Text(text) => markup::write_text(&mut self.out, &text.text),
            Node::Comment(comment) => markup::write_comment(&mut self.out, &comment.comment),
            _ => {
                for child in node.children() {
                    self.walk(child);
                }
            }
        }
    }
}
