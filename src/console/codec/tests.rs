use super::*;

fn ring(capacity: usize) -> RingBuffer {
    RingBuffer::new(capacity).unwrap()
}

fn decode_all(ring: &RingBuffer, defaults: &ConsoleStyle) -> (Vec<(String, ResolvedStyle)>, StopReason) {
    let mut replay = Replay::new(ring, defaults);
    let mut out = Vec::new();
    while let Some((style, text)) = replay.next_record() {
        out.push((text.into_owned(), style));
    }
    (out, replay.stop_reason().unwrap())
}

/// Bytes read forward starting at the boundary.
fn forward_bytes(ring: &RingBuffer) -> Vec<u8> {
    (0..ring.capacity())
        .map(|d| ring.read_byte_at(ring.boundary_index() + d))
        .collect()
}

#[test]
fn test_inherit_record_has_exact_layout() {
    let mut ring = ring(10);
    encode_record(&mut ring, b"AB", &RecordStyle::inherit());

    assert_eq!(ring.boundary_index(), 6);
    assert_eq!(ring.as_bytes(), &[0, 0, 0, 0, 0, 0, 0, 0x8E, b'A', b'B']);
}

#[test]
fn test_inherit_record_decodes_to_console_style() {
    let mut ring = ring(10);
    encode_record(&mut ring, b"AB", &RecordStyle::inherit());
    let defaults = ConsoleStyle {
        text_color: Color::GREEN,
        background_color: Color::BLUE,
        font: Some(FontId::BOLD),
        alignment: Alignment::Right,
        word_wrap: false,
    };

    let (records, stop) = decode_all(&ring, &defaults);
    assert_eq!(records, vec![("AB".to_string(), ResolvedStyle::from(defaults))]);
    assert_eq!(stop, StopReason::Boundary);
}

#[test]
fn test_settings_byte_for_fully_explicit_record() {
    let mut ring = ring(32);
    let style = RecordStyle::inherit()
        .text_color(Color::RED)
        .background_color(Color::BLACK)
        .font(FontId(0x1122_3344))
        .alignment(Alignment::Center)
        .word_wrap(true);
    encode_record(&mut ring, b"hi", &style);

    let bytes = forward_bytes(&ring);
    assert_eq!(
        &bytes[..11],
        &[0, 0xF5, 0xC0, 0xF0, 0x11, 0x22, 0x33, 0x44, b'h', b'i', 0]
    );
}

#[test]
fn test_explicit_fields_survive_any_console_style() {
    let mut ring = ring(32);
    let style = RecordStyle::inherit()
        .text_color(Color::RED)
        .background_color(Color::BLACK)
        .font(FontId(0x0100_00FF))
        .alignment(Alignment::Left)
        .word_wrap(false);
    encode_record(&mut ring, b"pinned", &style);
    let defaults = ConsoleStyle {
        alignment: Alignment::Right,
        word_wrap: true,
        ..ConsoleStyle::default()
    };

    let (records, _) = decode_all(&ring, &defaults);
    assert_eq!(
        records[0].1,
        ResolvedStyle {
            text_color: Color::RED,
            background_color: Color::BLACK,
            font: Some(FontId(0x0100_00FF)),
            alignment: Alignment::Left,
            word_wrap: false,
        }
    );
}

#[test]
fn test_wrap_bits_eleven_means_inherit() {
    let settings = Settings::from_bits_retain(0b1000_0011);
    assert_eq!(settings.word_wrap(), None);
    let settings = Settings::from_bits_retain(0b1000_0001);
    assert_eq!(settings.word_wrap(), Some(true));
    let settings = Settings::from_bits_retain(0b1000_0000);
    assert_eq!(settings.word_wrap(), Some(false));
}

#[test]
fn test_alignment_bits_decode() {
    assert_eq!(Settings::from_bits_retain(0x80).alignment(), Some(Alignment::Left));
    assert_eq!(Settings::from_bits_retain(0x84).alignment(), Some(Alignment::Center));
    assert_eq!(Settings::from_bits_retain(0x88).alignment(), Some(Alignment::Right));
    assert_eq!(Settings::from_bits_retain(0x8C).alignment(), None);
}

#[test]
fn test_oversized_record_is_torn() {
    let mut ring = ring(10);
    assert_eq!(encoded_len(8, &RecordStyle::inherit()), 11);
    encode_record(&mut ring, b"AAAAAAAA", &RecordStyle::inherit());

    let (records, stop) = decode_all(&ring, &ConsoleStyle::default());
    assert!(records.is_empty());
    assert_eq!(stop, StopReason::Torn);
}

#[test]
fn test_record_filling_the_whole_ring_still_decodes() {
    let mut ring = ring(10);
    assert_eq!(encoded_len(7, &RecordStyle::inherit()), 10);
    encode_record(&mut ring, b"AAAAAAA", &RecordStyle::inherit());

    let (records, stop) = decode_all(&ring, &ConsoleStyle::default());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, "AAAAAAA");
    assert_eq!(stop, StopReason::Boundary);
}

#[test]
fn test_eviction_stops_at_partly_overwritten_record() {
    let mut ring = ring(12);
    for text in [b"one", b"two", b"six"] {
        encode_record(&mut ring, text, &RecordStyle::inherit());
    }

    let (records, stop) = decode_all(&ring, &ConsoleStyle::default());
    let texts: Vec<_> = records.into_iter().map(|(text, _)| text).collect();
    assert_eq!(texts, vec!["six", "two"]);
    assert_eq!(stop, StopReason::Torn);
}

#[test]
fn test_font_bytes_past_capacity_are_torn() {
    // Settings byte claims a font, but the ring ends before four bytes fit.
    let mut ring = ring(4);
    ring.write_byte_at(1, 0x80 | 0x10);
    ring.write_byte_at(2, 7);
    ring.write_byte_at(3, 7);

    let (records, stop) = decode_all(&ring, &ConsoleStyle::default());
    assert!(records.is_empty());
    assert_eq!(stop, StopReason::Torn);
}

#[test]
fn test_wrapped_record_matches_unwrapped_bytes() {
    let style = RecordStyle::inherit()
        .font(FontId::ITALIC)
        .text_color(Color::ORANGE)
        .alignment(Alignment::Right);
    let mut baseline = ring(16);
    encode_record(&mut baseline, b"hello", &style);
    let expected_bytes = forward_bytes(&baseline);
    let (expected, _) = decode_all(&baseline, &ConsoleStyle::default());

    for start in 1..16 {
        let mut shifted = ring(16);
        shifted.set_boundary(start);
        encode_record(&mut shifted, b"hello", &style);

        assert_eq!(forward_bytes(&shifted), expected_bytes, "start={start}");
        let (records, _) = decode_all(&shifted, &ConsoleStyle::default());
        assert_eq!(records[..1], expected[..1], "start={start}");
    }
}

#[test]
fn test_empty_text_is_a_record() {
    let mut ring = ring(3);
    encode_record(&mut ring, b"", &RecordStyle::inherit());

    let (records, stop) = decode_all(&ring, &ConsoleStyle::default());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, "");
    assert_eq!(stop, StopReason::Boundary);
}

#[test]
fn test_replay_is_restartable() {
    let mut ring = ring(64);
    encode_record(&mut ring, b"first", &RecordStyle::inherit());
    encode_record(&mut ring, b"second", &RecordStyle::inherit());
    let defaults = ConsoleStyle::default();

    let (a, _) = decode_all(&ring, &defaults);
    let (b, _) = decode_all(&ring, &defaults);
    assert_eq!(a, b);
    assert_eq!(a[0].0, "second");
    assert_eq!(a[1].0, "first");
}

#[test]
fn test_failed_scratch_reservation_stops_before_decoding() {
    let mut ring = ring(64);
    encode_record(&mut ring, b"kept", &RecordStyle::inherit());
    let defaults = ConsoleStyle::default();

    let mut replay = Replay::with_scratch_capacity(&ring, &defaults, usize::MAX);
    assert_eq!(replay.stop_reason(), Some(StopReason::ScratchUnavailable));
    assert!(replay.next_record().is_none());
    assert_eq!(replay.stop_reason(), Some(StopReason::ScratchUnavailable));

    // The ring itself is untouched and replays normally afterwards.
    let (records, stop) = decode_all(&ring, &defaults);
    assert_eq!(records[0].0, "kept");
    assert_eq!(stop, StopReason::Boundary);
}
