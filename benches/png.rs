use criterion::{criterion_group, criterion_main, BatchSize::SmallInput, Criterion};
use pngstash::{data_url, session, Session};
use serde_json::json;

const MAGIC: &[u8] = b"\x89PNG\x0D\x0A\x1A\x0A";

fn chunk(kind: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 12);
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(payload);
    out.extend_from_slice(&pngstash::png::crc32(kind, payload).to_be_bytes());
    out
}

// A 512x512 shaped PNG with 64 KiB of filler pixel data.
fn sample_image() -> String {
    let mut header = Vec::with_capacity(13);
    header.extend_from_slice(&512u32.to_be_bytes());
    header.extend_from_slice(&512u32.to_be_bytes());
    header.extend_from_slice(&[8, 6, 0, 0, 0]);
    let mut png = MAGIC.to_vec();
    png.extend(chunk(b"IHDR", &header));
    png.extend(chunk(b"IDAT", &vec![0; 64 * 1024]));
    png.extend(chunk(b"IEND", &[]));
    data_url::encode(data_url::PNG, &png)
}

fn sample_session() -> Session {
    Session {
        state: json!({ "strokes": vec![7; 256] }),
        config: json!({ "theme": "dark", "zoom": 1.25 }),
    }
}

pub fn write(c: &mut Criterion) {
    let image = sample_image();
    let session = sample_session();
    c.bench_function("session write", |b| {
        b.iter_batched(|| image.clone(), |image| session::write(&image, &session), SmallInput)
    });
}

pub fn read(c: &mut Criterion) {
    let written = session::write(&sample_image(), &sample_session());
    c.bench_function("session read", |b| {
        b.iter_batched(|| written.clone(), |image| session::read(&image), SmallInput)
    });
}

criterion_group!(png, read, write);
criterion_main!(png);
