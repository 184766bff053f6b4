use std::io::Write;

use fastq_stats::{parse_fastq_file, FastqAnalyzer};
use fastq_stats::stats::{run_pass, LengthCollector};
use tempfile::NamedTempFile;

const FASTQ: &[u8] = b"@test\nAGCTGATCGA\n+\nIIIIIIIIII\n@test2\nTAGC\n+\nIIII\n";

fn write_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

#[cfg(feature = "compression")]
fn compressed_files() -> Vec<NamedTempFile> {
    let mut gz = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    gz.write_all(FASTQ).unwrap();
    let mut bz = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
    bz.write_all(FASTQ).unwrap();
    let mut xz = xz2::write::XzEncoder::new(Vec::new(), 6);
    xz.write_all(FASTQ).unwrap();

    vec![
        write_file(&gz.finish().unwrap()),
        write_file(&bz.finish().unwrap()),
        write_file(&xz.finish().unwrap()),
    ]
}

#[cfg(feature = "compression")]
#[test]
fn can_read_compressed_files_automatically() {
    for file in compressed_files() {
        let mut reader = parse_fastq_file(file.path()).unwrap();
        let mut i = 0;
        while let Some(record) = reader.next() {
            let rec = record.unwrap();
            match i {
                0 => {
                    assert_eq!(rec.id(), b"test");
                    assert_eq!(rec.seq(), b"AGCTGATCGA");
                }
                1 => {
                    assert_eq!(rec.id(), b"test2");
                    assert_eq!(rec.seq(), b"TAGC");
                }
                _ => unreachable!("Too many records"),
            }
            i += 1;
        }
        assert_eq!(i, 2);
    }
}

#[cfg(feature = "compression")]
#[test]
fn bad_gzip_checksum_closes_the_pass() {
    let mut gz = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    gz.write_all(FASTQ).unwrap();
    let mut bytes = gz.finish().unwrap();
    // the CRC32 is the first half of the 8 byte trailer
    let crc = bytes.len() - 8;
    bytes[crc] ^= 0xFF;
    let file = write_file(&bytes);

    let mut reader = parse_fastq_file(file.path()).unwrap();
    let e = run_pass(&mut *reader, LengthCollector::new()).unwrap_err();
    assert_eq!(e.kind, fastq_stats::ParseErrorKind::SourceClosed);
}

#[test]
fn plain_files_are_read_as_is() {
    let file = write_file(FASTQ);
    let mut reader = parse_fastq_file(file.path()).unwrap();
    let lengths = run_pass(&mut *reader, LengthCollector::new()).unwrap();
    assert_eq!(lengths, vec![10, 4]);
}

#[test]
fn plain_header_starting_with_bz_is_not_decompressed() {
    let file = write_file(b"BZ1\nACGT\n+\nIIII\n");
    let mut analyzer = FastqAnalyzer::new(file.path());
    assert_eq!(analyzer.sequence_count().unwrap(), 1);
}
