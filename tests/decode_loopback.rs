//! Integration tests: synthesized line signal → decoded text
//!
//! These tests drive the full threaded decoder: dual-tone bursts are
//! synthesized as 8-bit samples, pushed through the sample channel, and the
//! text the handler receives is checked on the other side.

use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use dialtone::{DecoderConfig, DtmfDecoder};

/// Sampling rate of the reference line interface
const RATE: f64 = 9615.38;

/// Superimposed pair of sinusoids at `amp` each, centered on the 8-bit
/// midpoint, lasting `millis` milliseconds
fn dual_tone(f1: f64, f2: f64, amp: f64, millis: u64) -> Vec<u8> {
    let n = (RATE * millis as f64 / 1000.0).round() as usize;
    (0..n)
        .map(|i| {
            let t = i as f64 / RATE;
            let w = 2.0 * std::f64::consts::PI;
            let v = 128.0 + amp * ((w * f1 * t).sin() + (w * f2 * t).sin());
            v.round().clamp(0.0, 255.0) as u8
        })
        .collect()
}

/// Flat line at the 8-bit midpoint
fn silence(millis: u64) -> Vec<u8> {
    vec![128; (RATE * millis as f64 / 1000.0).round() as usize]
}

fn send_all(tx: &Sender<u8>, samples: &[u8]) {
    for &s in samples {
        tx.send(s).unwrap();
    }
}

/// A started decoder whose handler forwards every delivery to a channel
fn started_decoder() -> (DtmfDecoder, Sender<u8>, Receiver<String>) {
    let _ = env_logger::builder().is_test(true).try_init();

    let (sample_tx, sample_rx) = unbounded();
    let (text_tx, text_rx) = unbounded();
    let mut decoder = DtmfDecoder::new(
        DecoderConfig::new(RATE),
        sample_rx,
        Box::new(move |text| {
            let _ = text_tx.send(text.to_string());
        }),
    )
    .unwrap();
    decoder.start().unwrap();
    (decoder, sample_tx, text_rx)
}

fn expect_text(rx: &Receiver<String>, expected: &str) {
    match rx.recv_timeout(Duration::from_secs(5)) {
        Ok(text) => assert_eq!(text, expected),
        Err(_) => panic!("timed out waiting for {expected:?}"),
    }
}

fn expect_no_text(rx: &Receiver<String>) {
    if let Ok(text) = rx.recv_timeout(Duration::from_millis(300)) {
        panic!("unexpected delivery: {text:?}");
    }
}

#[test]
fn single_burst_decodes_exactly_once() {
    let (mut decoder, tx, rx) = started_decoder();

    // 770 + 1336 Hz is keypad '5'; the pause after the burst finalizes it
    send_all(&tx, &dual_tone(770.0, 1336.0, 30.0, 50));
    send_all(&tx, &silence(20));

    expect_text(&rx, "5");
    expect_no_text(&rx);

    decoder.stop().unwrap();
}

#[test]
fn consecutive_keys_decode_in_sequence() {
    let (mut decoder, tx, rx) = started_decoder();

    send_all(&tx, &dual_tone(770.0, 1336.0, 30.0, 50));
    send_all(&tx, &silence(20));
    send_all(&tx, &dual_tone(770.0, 1633.0, 30.0, 50));
    send_all(&tx, &silence(20));

    expect_text(&rx, "5");
    expect_text(&rx, "B");

    decoder.stop().unwrap();
}

#[test]
fn bursts_are_delivered_in_signal_order() {
    let (mut decoder, tx, rx) = started_decoder();

    let keys = [("1", 697.0, 1209.0), ("5", 770.0, 1336.0), ("B", 770.0, 1633.0)];
    for &(_, low, high) in &keys {
        send_all(&tx, &dual_tone(low, high, 30.0, 50));
        send_all(&tx, &silence(20));
    }
    for &(key, _, _) in &keys {
        expect_text(&rx, key);
    }

    decoder.stop().unwrap();
}

#[test]
fn silence_never_produces_text() {
    let (mut decoder, tx, rx) = started_decoder();

    send_all(&tx, &silence(100));
    expect_no_text(&rx);

    decoder.stop().unwrap();
}

#[test]
fn hook_markers_follow_sustained_line_level() {
    let (mut decoder, tx, rx) = started_decoder();

    // Sustained high level: handset lifted. The level is steady, so it also
    // classifies as silence and produces no symbol.
    send_all(&tx, &vec![200u8; 300]);
    expect_text(&rx, "\nOFF-HOOK\n");

    // Dead-band level: no transition in either direction
    send_all(&tx, &silence(30));
    expect_no_text(&rx);

    // Sustained low level: handset back on the cradle
    send_all(&tx, &vec![10u8; 300]);
    expect_text(&rx, "\nON-HOOK\n");

    decoder.stop().unwrap();
}

#[test]
fn nothing_is_delivered_after_stop_returns() {
    let (mut decoder, tx, rx) = started_decoder();

    send_all(&tx, &dual_tone(770.0, 1336.0, 30.0, 50));
    send_all(&tx, &silence(20));
    expect_text(&rx, "5");

    decoder.stop().unwrap();

    // The channel stays open, but no worker is left to consume it
    send_all(&tx, &dual_tone(770.0, 1633.0, 30.0, 50));
    send_all(&tx, &silence(20));
    expect_no_text(&rx);
}
