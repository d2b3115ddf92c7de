use repurpose::{Chunk, Chunker};
use spectral::prelude::*;

/// Rebuilds the source text by dropping the overlapping head of every chunk after the first.
fn reassemble(chunks: &[String], overlap: usize) -> String {
    chunks
        .iter()
        .enumerate()
        .flat_map(|(index, chunk)| chunk.chars().skip(if index == 0 { 0 } else { overlap }))
        .collect()
}

/// One window, plus one per step needed to cover what lies past the first overlap.
fn expected_count(length: usize, size: usize, overlap: usize) -> usize {
    if length <= size {
        1
    } else {
        (length - overlap).div_ceil(size - overlap)
    }
}

fn assert_overlap(chunks: &[String], overlap: usize) {
    for pair in chunks.windows(2) {
        if let [previous, next] = pair {
            let previous_chars: Vec<char> = previous.chars().collect();
            let tail: String = previous_chars
                .iter()
                .skip(previous_chars.len() - overlap)
                .collect();
            let head: String = next.chars().take(overlap).collect();
            assert_that(&tail).is_equal_to(head);
        }
    }
}

#[test]
fn splits_with_exact_character_overlap() {
    let chunker = Chunker::new(4, 2).expect("Valid chunker");

    assert_that(&chunker.split_text("abcdefghij")).is_equal_to(vec![
        "abcd".to_owned(),
        "cdef".to_owned(),
        "efgh".to_owned(),
        "ghij".to_owned(),
    ]);
}

#[test]
fn short_text_is_a_single_chunk() {
    let chunker = Chunker::new(10, 3).expect("Valid chunker");

    for text in ["", "a", "exactly 10"] {
        assert_that(&chunker.split_text(text)).is_equal_to(vec![text.to_owned()]);
    }
}

#[test]
fn final_chunk_may_be_shorter() {
    let chunker = Chunker::new(4, 1).expect("Valid chunker");
    let chunks = chunker.chunks("abcdefgh");

    assert_that(&chunks).is_equal_to(vec![
        Chunk {
            index: 0,
            start: 0,
            end: 4,
            text: "abcd".to_owned(),
        },
        Chunk {
            index: 1,
            start: 3,
            end: 7,
            text: "defg".to_owned(),
        },
        Chunk {
            index: 2,
            start: 6,
            end: 8,
            text: "gh".to_owned(),
        },
    ]);
}

#[test]
fn zero_overlap_partitions_text() {
    let chunker = Chunker::new(3, 0).expect("Valid chunker");

    assert_that(&chunker.split_text("abcdefg")).is_equal_to(vec![
        "abc".to_owned(),
        "def".to_owned(),
        "g".to_owned(),
    ]);
}

#[test]
fn chunks_respect_size_and_reassemble() {
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(40);

    for (size, overlap) in [(1, 0), (7, 3), (50, 49), (64, 16), (4000, 200)] {
        let chunker = Chunker::new(size, overlap).expect("Valid chunker");
        let chunks = chunker.split_text(&text);

        assert_that(&chunks.len()).is_equal_to(expected_count(text.chars().count(), size, overlap));
        for chunk in &chunks {
            assert_that(&chunk.chars().count()).is_less_than_or_equal_to(size);
        }
        assert_overlap(&chunks, overlap);
        assert_that(&reassemble(&chunks, overlap)).is_equal_to(text.clone());
    }
}

#[test]
fn multibyte_text_keeps_overlap() {
    let text = "Привет, мир! 你好世界 🚀🚀 naïve café";
    let chunker = Chunker::new(5, 2).expect("Valid chunker");
    let chunks = chunker.split_text(text);

    assert_that(&chunks.first().map(String::as_str)).is_equal_to(Some("Приве"));
    for chunk in &chunks {
        assert_that(&chunk.chars().count()).is_less_than_or_equal_to(5);
    }
    assert_overlap(&chunks, 2);
    assert_that(&reassemble(&chunks, 2)).is_equal_to(text.to_owned());
}

#[test]
fn offsets_are_in_characters() {
    let chunker = Chunker::new(3, 1).expect("Valid chunker");
    let chunks = chunker.chunks("äöüß");

    let offsets: Vec<(usize, usize)> = chunks.iter().map(|c| (c.start, c.end)).collect();
    assert_that(&offsets).is_equal_to(vec![(0, 3), (2, 4)]);
}

#[test]
fn no_trailing_chunk_is_redundant() {
    for (length, size, overlap) in [(10, 4, 2), (8, 4, 1), (9, 4, 1), (11, 5, 0), (6, 5, 4)] {
        let text = "x".repeat(length);
        let chunker = Chunker::new(size, overlap).expect("Valid chunker");
        let chunks = chunker.chunks(&text);

        assert_that(&chunks.len()).is_equal_to(expected_count(length, size, overlap));
        assert_that(&chunks.last().map(|chunk| chunk.end)).is_equal_to(Some(length));
    }
}

#[test]
fn overlap_not_below_size_is_rejected() {
    assert_that(&Chunker::new(4, 4)).is_err();
    assert_that(&Chunker::new(4, 10)).is_err();
    assert_that(&Chunker::new(0, 0)).is_err();
}

#[test]
fn default_matches_original_settings() {
    let chunker = Chunker::default();

    assert_that(&chunker.chunk_size()).is_equal_to(4000);
    assert_that(&chunker.chunk_overlap()).is_equal_to(200);
}
