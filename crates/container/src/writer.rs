use news::{Location, SourceArticle};
use std::fs::{self, rename, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::assembler::Assembler;
use crate::error::ContainerError;
use crate::format::{Header, Section, FORMAT_VERSION};
use crate::records::TimestampEntry;
use crate::{article, image, location, source, topic};

/// Everything the layout engine needs for one container.
#[derive(Debug, Clone, Copy)]
pub struct ContainerInput<'a> {
    /// Provider logo picture; may be empty.
    pub logo: &'a [u8],
    pub location: &'a Location,
    /// This run's articles, in the order they get their ids.
    pub articles: &'a [SourceArticle],
    /// Timestamp runs indexed by topic slot, slot 0 empty.
    pub timestamps: &'a [Vec<TimestampEntry>],
    /// Encoded device time of this run.
    pub updated: u32,
    pub country_code: u8,
    pub language_code: u8,
}

/// Lays out and publishes news containers.
///
/// Like the rest of the layout code the writer keeps no state between
/// calls: [`build`](ContainerWriter::build) produces the finished bytes in
/// memory and [`publish`](ContainerWriter::publish) moves them into place.
pub struct ContainerWriter {}

impl ContainerWriter {
    /// Builds the complete container image for `input`.
    ///
    /// # Order
    ///
    /// Source, Location, Topic, Article, then Image. Each builder reads the
    /// running length left by the previous ones, so this order is fixed. The
    /// article table is serialized last because the image builder patches
    /// picture links into it.
    ///
    /// # Errors
    ///
    /// Any field overflow or layout inconsistency aborts the build; no
    /// partial image is returned.
    pub fn build(input: &ContainerInput<'_>) -> Result<Vec<u8>, ContainerError> {
        let mut asm = Assembler::new();

        let sources = source::build(&mut asm, input.logo)?;
        let locations = location::build(&mut asm, input.location)?;
        let topics = topic::build(&mut asm, input.timestamps)?;

        let mut articles = article::build(&mut asm, input.articles, input.updated)?;
        let images = image::build(&mut asm, input.articles, &mut articles.records, input.updated)?;
        asm.fill_table(Section::ArticleTable, &articles.records)?;

        debug!(
            sources = sources.offset,
            locations = locations.offset,
            topics = topics.offset,
            articles = articles.table.offset,
            images = images.offset,
            "table offsets"
        );

        let header = Header {
            version: FORMAT_VERSION,
            updated_1: input.updated,
            updated_2: input.updated,
            country_code: input.country_code,
            language_code: input.language_code,
            sources,
            locations,
            topics,
            articles: articles.table,
            images,
            ..Header::default()
        };

        asm.finish(header)
    }

    /// Atomically writes `bytes` to `path`.
    ///
    /// Writes `path.tmp`, fsyncs it, then renames it over `path`, so a reader
    /// only ever sees the previous complete file or the new one. Parent
    /// directories are created as needed. On failure the temporary file is
    /// removed and `path` is left untouched.
    pub fn publish(path: &Path, bytes: &[u8]) -> Result<(), ContainerError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut tmp_name = path.as_os_str().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = Path::new(&tmp_name);

        if let Err(e) = write_then_rename(tmp_path, path, bytes) {
            let _ = fs::remove_file(tmp_path);
            return Err(e.into());
        }

        // Make the rename itself durable.
        if let Some(parent) = path.parent() {
            if let Ok(dir) = fs::File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        info!(path = %path.display(), bytes = bytes.len(), "published container");
        Ok(())
    }

    /// Builds the container for `input` and publishes it to `path`.
    ///
    /// Returns the number of bytes written. Nothing touches the filesystem
    /// unless the build succeeds.
    pub fn write(path: &Path, input: &ContainerInput<'_>) -> Result<usize, ContainerError> {
        let bytes = Self::build(input)?;
        Self::publish(path, &bytes)?;
        Ok(bytes.len())
    }
}

fn write_then_rename(tmp_path: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let raw_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(tmp_path)?;
    let mut file = BufWriter::new(raw_file);
    file.write_all(bytes)?;
    file.flush()?;
    file.into_inner().map_err(|e| e.into_error())?.sync_all()?;
    rename(tmp_path, path)
}
