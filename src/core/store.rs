// Headerless fixed-size record store

use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::byte_order::ByteOrderCodec;
use crate::core::config::StoreConfig;
use crate::core::constants::FIRST_RECORD;
use crate::core::error::{NavError, Result};
use crate::core::filename::FileStamp;
use crate::core::format::{check_arity, FileTimeDomain, RawSample, RecordKind};
use crate::core::rollover;
use crate::core::search::{self, SearchResult};

/// An open navigation-class file.
///
/// All time state (reference week, bounds, rollover flag), the byte-swap
/// decision and the sequential cursor belong to this handle. Separate handles
/// share nothing and may be used from separate threads; one handle needs
/// `&mut` for every read.
pub struct RecordStore<R = File> {
    path: Option<PathBuf>,
    source: R,
    kind: RecordKind,
    codec: ByteOrderCodec,
    config: StoreConfig,
    domain: FileTimeDomain,
    cursor: u64,
}

impl RecordStore<File> {
    pub fn open<P: AsRef<Path>>(path: P, kind: RecordKind) -> Result<Self> {
        Self::open_with_config(path, kind, StoreConfig::default())
    }

    pub fn open_navigation<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(path, RecordKind::NAVIGATION)
    }

    pub fn open_precision<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(path, RecordKind::PRECISION)
    }

    pub fn open_with_config<P: AsRef<Path>>(
        path: P,
        kind: RecordKind,
        config: StoreConfig,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let stamp = FileStamp::parse(&path)?;

        let file = File::open(&path).map_err(|source| NavError::FileUnavailable {
            path: path.clone(),
            source,
        })?;

        let mut store = Self::from_reader(file, kind, stamp.reference_week_epoch(), config)?;
        debug!(
            "Opened {} file {:?} (week of {}, {} records)",
            kind.name,
            path,
            stamp.date,
            store.record_count()
        );
        store.path = Some(path);
        Ok(store)
    }
}

impl<R: Read + Seek> RecordStore<R> {
    // Any seekable source whose reference week is already known
    pub fn from_reader(
        mut source: R,
        kind: RecordKind,
        reference_week_epoch: i64,
        config: StoreConfig,
    ) -> Result<Self> {
        config.validate()?;
        let codec = ByteOrderCodec::little_endian_disk();
        let domain = Self::read_domain(&mut source, kind, codec, reference_week_epoch)?;
        source.seek(SeekFrom::Start(0))?;

        Ok(Self {
            path: None,
            source,
            kind,
            codec,
            config,
            domain,
            cursor: FIRST_RECORD,
        })
    }

    fn read_domain(
        source: &mut R,
        kind: RecordKind,
        codec: ByteOrderCodec,
        reference_week_epoch: i64,
    ) -> Result<FileTimeDomain> {
        let size = kind.record_size() as u64;
        let len = source.seek(SeekFrom::End(0))?;

        let count = len / size;
        let tail = len % size;
        if tail != 0 {
            warn!(
                "Ignoring {} trailing bytes after record {} ({} file)",
                tail, count, kind.name
            );
        }
        if count < 2 {
            return Err(NavError::InsufficientRecords { count });
        }

        let first = Self::decode_at(source, kind, codec, FIRST_RECORD)?;
        let last = Self::decode_at(source, kind, codec, count)?;

        let start_timestamp = rollover::to_micros(reference_week_epoch, first.seconds_of_week());
        let mut end_timestamp = rollover::to_micros(reference_week_epoch, last.seconds_of_week());

        let rollover_occurred = end_timestamp < start_timestamp;
        if rollover_occurred {
            end_timestamp += rollover::week_micros();
            warn!(
                "GPS week rollover in {} file: first sow {}, last sow {}",
                kind.name,
                first.seconds_of_week(),
                last.seconds_of_week()
            );
        }

        let domain = FileTimeDomain {
            reference_week_epoch,
            start_record: FIRST_RECORD,
            end_record: count,
            start_timestamp,
            end_timestamp,
            start_seconds_of_week: first.seconds_of_week(),
            rollover_occurred,
        };
        debug!(?domain, "Derived time domain");
        Ok(domain)
    }

    fn decode_at(
        source: &mut R,
        kind: RecordKind,
        codec: ByteOrderCodec,
        index: u64,
    ) -> Result<RawSample> {
        let size = kind.record_size();
        source.seek(SeekFrom::Start((index - FIRST_RECORD) * size as u64))?;

        let mut buf = vec![0u8; size];
        source.read_exact(&mut buf).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => NavError::EndOfFile { index },
            _ => NavError::Io(e),
        })?;

        Ok(RawSample::new(codec.decode_fields(&buf)))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn domain(&self) -> &FileTimeDomain {
        &self.domain
    }

    pub fn record_count(&self) -> u64 {
        self.domain.end_record
    }

    pub fn swaps_bytes(&self) -> bool {
        self.codec.swaps()
    }

    pub fn start_timestamp(&self) -> i64 {
        self.domain.start_timestamp
    }

    pub fn end_timestamp(&self) -> i64 {
        self.domain.end_timestamp
    }

    pub fn position(&self) -> u64 {
        self.cursor
    }

    pub fn rewind(&mut self) {
        self.cursor = FIRST_RECORD;
    }

    pub fn seek_record(&mut self, index: u64) -> Result<()> {
        if index < FIRST_RECORD {
            return Err(NavError::InvalidRecordIndex(index));
        }
        self.cursor = index;
        Ok(())
    }

    /// Read record `index` (1-based) with raw seconds-of-week.
    pub fn read_record(&mut self, index: u64) -> Result<RawSample> {
        if index < FIRST_RECORD {
            return Err(NavError::InvalidRecordIndex(index));
        }
        if index > self.domain.end_record {
            return Err(NavError::EndOfFile { index });
        }
        Self::decode_at(&mut self.source, self.kind, self.codec, index)
    }

    pub fn read_corrected(&mut self, index: u64) -> Result<RawSample> {
        let mut sample = self.read_record(index)?;
        let corrected = self.domain.correct(sample.seconds_of_week());
        sample.set_seconds_of_week(corrected);
        Ok(sample)
    }

    pub fn read_sequential(&mut self) -> Result<RawSample> {
        let sample = self.read_record(self.cursor)?;
        self.cursor += 1;
        Ok(sample)
    }

    pub fn samples(&mut self) -> Samples<'_, R> {
        Samples {
            store: self,
            failed: false,
        }
    }

    pub fn timestamp_of(&self, sample: &RawSample) -> i64 {
        self.domain.timestamp_of(sample.seconds_of_week())
    }

    pub fn encode_record(&self, sample: &RawSample) -> Result<Vec<u8>> {
        check_arity(sample, &self.kind)?;
        Ok(self.codec.encode_fields(&sample.fields))
    }

    pub fn find_record(&mut self, timestamp: i64) -> Result<SearchResult> {
        search::find_record(self, timestamp)
    }
}

pub struct Samples<'a, R> {
    store: &'a mut RecordStore<R>,
    failed: bool,
}

impl<R: Read + Seek> Iterator for Samples<'_, R> {
    type Item = Result<RawSample>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.store.cursor > self.store.domain.end_record {
            return None;
        }
        let item = self.store.read_sequential();
        self.failed = item.is_err();
        Some(item)
    }
}

// Append one record in disk byte order
pub fn write_record<W: Write>(writer: &mut W, kind: RecordKind, sample: &RawSample) -> Result<()> {
    check_arity(sample, &kind)?;
    let codec = ByteOrderCodec::little_endian_disk();
    writer.write_all(&codec.encode_fields(&sample.fields))?;
    Ok(())
}
