//! EPUB container serialization.
//!
//! An EPUB is a zip archive with a fixed skeleton: an uncompressed
//! `mimetype` entry first, `META-INF/container.xml` pointing at the package
//! document, then the package document, navigation files, pages, and
//! assets under the content root. The spine lists pages in reading order;
//! both navigation structures (EPUB 3 nav and legacy NCX) mirror the same
//! full page list, cover and table of contents included.

use std::io::{Cursor, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::app::Result;
use crate::book::OutputDocument;

const MIMETYPE: &str = "application/epub+zip";

/// Directory inside the archive that holds all content.
const CONTENT_ROOT: &str = "OEBPS";

/// Serialize the document into EPUB bytes.
pub fn serialize(doc: &OutputDocument) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    // The mimetype entry must come first and must not be compressed.
    zip.start_file("mimetype", stored)?;
    zip.write_all(MIMETYPE.as_bytes())?;

    zip.start_file("META-INF/container.xml", deflated)?;
    zip.write_all(CONTAINER_XML.as_bytes())?;

    zip.start_file(format!("{CONTENT_ROOT}/content.opf"), deflated)?;
    zip.write_all(package_document(doc).as_bytes())?;

    zip.start_file(format!("{CONTENT_ROOT}/nav.xhtml"), deflated)?;
    zip.write_all(nav_document(doc).as_bytes())?;

    zip.start_file(format!("{CONTENT_ROOT}/toc.ncx"), deflated)?;
    zip.write_all(ncx_document(doc).as_bytes())?;

    for page in doc.pages() {
        zip.start_file(format!("{CONTENT_ROOT}/{}", page.href), deflated)?;
        zip.write_all(page.content.as_bytes())?;
    }

    for asset in doc.assets() {
        zip.start_file(format!("{CONTENT_ROOT}/{}", asset.href), deflated)?;
        zip.write_all(&asset.data)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Serialize and write the archive to `path`.
pub fn write(doc: &OutputDocument, path: &Path) -> Result<()> {
    let bytes = serialize(doc)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>
"#;

fn package_document(doc: &OutputDocument) -> String {
    let meta = &doc.meta;

    let mut manifest = String::new();
    manifest.push_str(
        "    <item id=\"nav\" href=\"nav.xhtml\" media-type=\"application/xhtml+xml\" properties=\"nav\"/>\n",
    );
    manifest
        .push_str("    <item id=\"ncx\" href=\"toc.ncx\" media-type=\"application/x-dtbncx+xml\"/>\n");
    for page in doc.pages() {
        manifest.push_str(&format!(
            "    <item id=\"{}\" href=\"{}\" media-type=\"application/xhtml+xml\"/>\n",
            escape(&page.id),
            escape(&page.href)
        ));
    }
    for asset in doc.assets() {
        manifest.push_str(&format!(
            "    <item id=\"{}\" href=\"{}\" media-type=\"{}\"/>\n",
            escape(&asset.id),
            escape(&asset.href),
            escape(&asset.media_type)
        ));
    }

    let mut spine = String::new();
    for page in doc.pages() {
        spine.push_str(&format!(
            "    <itemref idref=\"{}\"/>\n",
            escape(&page.id)
        ));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="pub-id">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:identifier id="pub-id">{identifier}</dc:identifier>
    <dc:title>{title}</dc:title>
    <dc:language>{language}</dc:language>
    <dc:creator>{author}</dc:creator>
    <dc:date>{date}</dc:date>
    <meta property="dcterms:modified">{date}T00:00:00Z</meta>
  </metadata>
  <manifest>
{manifest}  </manifest>
  <spine toc="ncx">
{spine}  </spine>
</package>
"#,
        identifier = escape(&meta.identifier),
        title = escape(&meta.title),
        language = escape(&meta.language),
        author = escape(&meta.author),
        date = escape(&meta.date),
        manifest = manifest,
        spine = spine,
    )
}

fn nav_document(doc: &OutputDocument) -> String {
    let mut items = String::new();
    for page in doc.pages() {
        items.push_str(&format!(
            "        <li><a href=\"{}\">{}</a></li>\n",
            escape(&page.href),
            escape(&page.title)
        ));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops">
  <head>
    <title>{title}</title>
  </head>
  <body>
    <nav epub:type="toc">
      <ol>
{items}      </ol>
    </nav>
  </body>
</html>
"#,
        title = escape(&doc.meta.title),
        items = items,
    )
}

fn ncx_document(doc: &OutputDocument) -> String {
    let mut nav_points = String::new();
    for (index, page) in doc.pages().iter().enumerate() {
        let order = index + 1;
        nav_points.push_str(&format!(
            r#"    <navPoint id="navpoint-{order}" playOrder="{order}">
      <navLabel><text>{title}</text></navLabel>
      <content src="{href}"/>
    </navPoint>
"#,
            order = order,
            title = escape(&page.title),
            href = escape(&page.href),
        ));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head>
    <meta name="dtb:uid" content="{identifier}"/>
    <meta name="dtb:depth" content="1"/>
    <meta name="dtb:totalPageCount" content="0"/>
    <meta name="dtb:maxPageNumber" content="0"/>
  </head>
  <docTitle><text>{title}</text></docTitle>
  <navMap>
{nav_points}  </navMap>
</ncx>
"#,
        identifier = escape(&doc.meta.identifier),
        title = escape(&doc.meta.title),
        nav_points = nav_points,
    )
}

fn escape(value: &str) -> String {
    // Safe in both XML text and attribute-value position.
    html_escape::encode_safe(value).to_string()
}
