//! XMind document parser (ZIP container + `content.json`).

use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::path::Path;

use serde::Deserialize;
use zip::ZipArchive;

use crate::detect::{detect_format_from_bytes, ContainerFormat};
use crate::error::{Error, Result};
use crate::model::{Marker, Metadata, NodeStyle, OutlineNode, Sheet, Workbook};

use super::options::{ParseOptions, CONTENT_ENTRY, METADATA_ENTRY};

const LEGACY_CONTENT_ENTRY: &str = "content.xml";

/// XMind document parser.
pub struct XmindParser {
    content: Vec<u8>,
    metadata: Option<Vec<u8>>,
    options: ParseOptions,
}

impl XmindParser {
    /// Open an XMind file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open an XMind file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Parse an XMind document from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse an XMind document from bytes with custom options.
    ///
    /// Accepts both the `.xmind` archive and a bare `content.json`.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        match detect_format_from_bytes(data)? {
            ContainerFormat::Archive => Self::from_archive(data, options),
            ContainerFormat::Json => Ok(Self {
                content: data.to_vec(),
                metadata: None,
                options,
            }),
        }
    }

    /// Parse an XMind document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse an XMind document from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    fn from_archive(data: &[u8], options: ParseOptions) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(data))?;

        let content = match read_entry(&mut archive, CONTENT_ENTRY)? {
            Some(content) => content,
            None if archive.index_for_name(LEGACY_CONTENT_ENTRY).is_some() => {
                return Err(Error::LegacyFormat);
            }
            None => return Err(Error::MissingContent(CONTENT_ENTRY.to_string())),
        };
        let metadata = read_entry(&mut archive, METADATA_ENTRY)?;

        log::debug!(
            "Read {} bytes of {} from {} archive entries",
            content.len(),
            CONTENT_ENTRY,
            archive.len()
        );

        Ok(Self {
            content,
            metadata,
            options,
        })
    }

    /// Decode the content and return the workbook.
    pub fn parse(&self) -> Result<Workbook> {
        let raw: RawContent = serde_json::from_slice(strip_bom(&self.content))?;
        let raw_sheets = match raw {
            RawContent::Sheets(sheets) => sheets,
            RawContent::Sheet(sheet) => vec![sheet],
        };

        let mut workbook = Workbook::new();
        workbook.metadata = self.parse_metadata();

        for (index, raw_sheet) in raw_sheets.into_iter().enumerate() {
            let Some(root) = raw_sheet.root_topic else {
                if self.options.is_lenient() {
                    log::warn!("Sheet {} has no root topic, skipping", index);
                    continue;
                }
                return Err(Error::Json(format!("sheet {} has no rootTopic", index)));
            };

            let root = self.convert_topic(root, 0)?;
            let title = raw_sheet.title.unwrap_or_else(|| root.title.clone());
            workbook.add_sheet(Sheet::new(title, root));
        }

        if workbook.is_empty() {
            return Err(Error::EmptyWorkbook);
        }

        Ok(workbook)
    }

    fn parse_metadata(&self) -> Metadata {
        let Some(ref bytes) = self.metadata else {
            return Metadata::default();
        };

        match serde_json::from_slice::<RawMetadata>(strip_bom(bytes)) {
            Ok(raw) => {
                let creator = raw.creator.unwrap_or_default();
                Metadata {
                    creator: creator.name,
                    creator_version: creator.version,
                }
            }
            Err(e) => {
                log::warn!("Ignoring unreadable {}: {}", METADATA_ENTRY, e);
                Metadata::default()
            }
        }
    }

    fn convert_topic(&self, raw: RawTopic, depth: usize) -> Result<OutlineNode> {
        let mut node = OutlineNode::new(raw.title.unwrap_or_default());

        if let Some(style) = raw.style {
            node.style = convert_style(style.properties);
        }
        if let Some(markers) = raw.markers {
            node.markers = markers
                .into_iter()
                .filter_map(|m| m.marker_id)
                .map(Marker::new)
                .collect();
        }

        let Some(children) = raw.children else {
            return Ok(node);
        };

        let limit = self.options.max_depth;
        if limit > 0 && depth + 1 >= limit {
            if self.options.is_lenient() {
                log::warn!(
                    "Outline deeper than {} levels, dropping children of '{}'",
                    limit,
                    node.title
                );
                return Ok(node);
            }
            return Err(Error::TooDeep(limit));
        }

        let mut topics = children.attached;
        if self.options.include_detached {
            topics.extend(children.detached);
        }

        node.children = topics
            .into_iter()
            .map(|child| self.convert_topic(child, depth + 1))
            .collect::<Result<Vec<_>>>()?;

        Ok(node)
    }
}

fn read_entry<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<Vec<u8>>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut buf = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut buf)?;
    Ok(Some(buf))
}

fn convert_style(properties: BTreeMap<String, serde_json::Value>) -> NodeStyle {
    let mut style = NodeStyle::default();
    for (key, value) in properties {
        match value {
            serde_json::Value::String(s) => style.set(key, s),
            serde_json::Value::Null => {}
            other => style.set(key, other.to_string()),
        }
    }
    style
}

fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawContent {
    Sheets(Vec<RawSheet>),
    Sheet(RawSheet),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSheet {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    root_topic: Option<RawTopic>,
}

#[derive(Deserialize)]
struct RawTopic {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    children: Option<RawChildren>,
    #[serde(default)]
    style: Option<RawStyle>,
    #[serde(default)]
    markers: Option<Vec<RawMarker>>,
}

#[derive(Deserialize)]
struct RawChildren {
    #[serde(default)]
    attached: Vec<RawTopic>,
    #[serde(default)]
    detached: Vec<RawTopic>,
}

#[derive(Deserialize)]
struct RawStyle {
    #[serde(default)]
    properties: BTreeMap<String, serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMarker {
    #[serde(default)]
    marker_id: Option<String>,
}

#[derive(Deserialize)]
struct RawMetadata {
    #[serde(default)]
    creator: Option<RawCreator>,
}

#[derive(Deserialize, Default)]
struct RawCreator {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
}
