//! Benchmarks for link rewriting.
//!
//! Run with: cargo bench --bench transform_benchmarks

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use evermark::domain::{Note, NoteGuid};
use evermark::index::NoteIndex;
use evermark::links::LinkFixer;
use evermark::migrate::{Migration, MigrationOptions};

/// Sample words for filler paragraphs
const WORDS: &[&str] = &[
    "kitchen", "recipe", "garden", "travel", "budget", "meeting", "project", "reading",
    "journal", "idea", "draft", "review",
];

fn guid(i: usize) -> NoteGuid {
    NoteGuid::new(format!("{:08x}-0000-4000-8000-{:012x}", i, i)).unwrap()
}

/// Builds note `i` of `count` with `links` internal links, some dangling.
fn generate_note(i: usize, count: usize, links: usize) -> Note {
    let mut body = String::new();
    for j in 0..links {
        let target = (i * 7 + j * 13) % (count + count / 10 + 1);
        let g = guid(target);
        body.push_str(&format!(
            "<div><a href=\"evernote:///view/1/s1/{g}/{g}/\">link {j}</a></div>"
        ));
        let words: Vec<&str> = (0..20).map(|k| WORDS[(i + j + k) % WORDS.len()]).collect();
        body.push_str(&format!("<div>{}</div>", words.join(" ")));
    }
    Note::new(
        guid(i),
        format!("Note {} - {}", i, WORDS[i % WORDS.len()]),
        "Bench",
        format!("<?xml version=\"1.0\"?><en-note>{}</en-note>", body),
    )
}

fn generate_index(count: usize, links: usize) -> NoteIndex {
    NoteIndex::from_notes((0..count).map(|i| generate_note(i, count, links)))
}

fn bench_transform_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_note");
    let index = generate_index(500, 10);

    for links in [1, 10, 50] {
        let note = generate_note(1, 500, links);
        group.throughput(Throughput::Elements(links as u64));
        group.bench_with_input(BenchmarkId::new("links", links), &note, |b, note| {
            let fixer = LinkFixer::new();
            b.iter_batched(
                || note.clone(),
                |mut n| fixer.transform(&mut n, &index).unwrap(),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_migration(c: &mut Criterion) {
    let mut group = c.benchmark_group("migration");

    for size in [100, 500, 1000] {
        let index = generate_index(size, 5);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("notes", size), &index, |b, index| {
            let migration = Migration::new(LinkFixer::new(), MigrationOptions::default());
            b.iter(|| {
                let mut sink: Vec<Note> = Vec::with_capacity(size);
                migration.run(index, &mut sink).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_transform_single, bench_migration);
criterion_main!(benches);
