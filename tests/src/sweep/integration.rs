#![cfg(test)]
use std::net::Ipv4Addr;

use pingsweep_common::config::SweepConfig;
use pingsweep_common::network::range::AddressRange;
use pingsweep_common::network::reply::ReplyStatus;
use pingsweep_core::report::WriterReporter;
use pingsweep_core::sweep::{SweepEngine, SweepSummary};

use crate::utils::{Observer, ScriptedTransport};

struct Outcome {
    stdout: String,
    stderr: String,
    summary: SweepSummary,
    observer: Observer,
}

fn sweep(transport: ScriptedTransport, range: AddressRange) -> Outcome {
    let observer = transport.observer();
    let mut reporter = WriterReporter::new(Vec::new(), Vec::new());

    let summary = SweepEngine::new(transport, SweepConfig::default()).run(&range, &mut reporter);

    let (out, err) = reporter.into_inner();
    Outcome {
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
        summary,
        observer,
    }
}

fn addr(last: u8) -> Ipv4Addr {
    Ipv4Addr::new(10, 0, 0, last)
}

/// One live host among three: only the banner and that host are printed.
#[test]
fn single_responder_in_small_range() {
    let transport = ScriptedTransport::new().answer(addr(2), ReplyStatus::Success, 5);

    let outcome = sweep(transport, AddressRange::new("10.0.0", 1, 3));

    assert_eq!(
        outcome.stdout,
        "Escaneando 10.0.0.1..3\n[+] Host ativo: 10.0.0.2 (tempo 5ms)\n"
    );
    assert!(outcome.stderr.is_empty());
    assert_eq!(outcome.summary.probed, 3);
    assert_eq!(outcome.summary.alive, 1);
    assert_eq!(outcome.observer.release_count(), 1);
}

#[test]
fn every_suffix_probed_once_in_ascending_order() {
    let outcome = sweep(ScriptedTransport::new(), AddressRange::new("10.0.0", 250, 300));

    assert_eq!(
        outcome.observer.probed(),
        vec![addr(250), addr(251), addr(252), addr(253), addr(254)]
    );
    assert_eq!(outcome.stdout, "Escaneando 10.0.0.250..254\n");
}

#[test]
fn clamped_full_range_covers_1_to_254() {
    let outcome = sweep(ScriptedTransport::new(), AddressRange::new("10.0.0", -10, 999));

    let probed = outcome.observer.probed();
    assert_eq!(probed.len(), 254);
    assert_eq!(probed.first(), Some(&addr(1)));
    assert_eq!(probed.last(), Some(&addr(254)));
    assert!(probed.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(outcome.stdout, "Escaneando 10.0.0.1..254\n");
}

#[test]
fn inverted_range_prints_banner_only() {
    let outcome = sweep(ScriptedTransport::new(), AddressRange::new("10.0.0", 20, 10));

    assert_eq!(outcome.stdout, "Escaneando 10.0.0.20..10\n");
    assert!(outcome.observer.probed().is_empty());
    assert_eq!(outcome.summary.probed, 0);
    assert_eq!(outcome.summary.invalid, 0);
    assert_eq!(outcome.observer.release_count(), 1);
}

#[test]
fn non_success_statuses_and_failures_stay_silent() {
    let transport = ScriptedTransport::new()
        .answer(addr(1), ReplyStatus::DestinationUnreachable(1), 3)
        .answer(addr(2), ReplyStatus::TimeExceeded(0), 4)
        .answer(addr(3), ReplyStatus::Success, 17)
        .fail(addr(4), "network is unreachable")
        .answer(addr(5), ReplyStatus::Other(12), 1);

    let outcome = sweep(transport, AddressRange::new("10.0.0", 1, 6));

    assert_eq!(
        outcome.stdout,
        "Escaneando 10.0.0.1..6\n[+] Host ativo: 10.0.0.3 (tempo 17ms)\n"
    );
    assert_eq!(outcome.summary.probed, 6);
    assert_eq!(outcome.summary.alive, 1);
    assert!(outcome.stderr.is_empty());
}

#[test]
fn hosts_are_reported_in_suffix_order() {
    let transport = ScriptedTransport::new()
        .answer(addr(9), ReplyStatus::Success, 1)
        .answer(addr(3), ReplyStatus::Success, 30)
        .answer(addr(6), ReplyStatus::Success, 2);

    let outcome = sweep(transport, AddressRange::new("10.0.0", 1, 10));

    assert_eq!(
        outcome.stdout,
        "Escaneando 10.0.0.1..10\n\
         [+] Host ativo: 10.0.0.3 (tempo 30ms)\n\
         [+] Host ativo: 10.0.0.6 (tempo 2ms)\n\
         [+] Host ativo: 10.0.0.9 (tempo 1ms)\n"
    );
}

#[test]
fn malformed_prefix_warns_per_target_and_never_probes() {
    let outcome = sweep(ScriptedTransport::new(), AddressRange::new("10.0.x", 1, 3));

    assert_eq!(outcome.stdout, "Escaneando 10.0.x.1..3\n");
    assert_eq!(
        outcome.stderr,
        "IP invalido: 10.0.x.1\nIP invalido: 10.0.x.2\nIP invalido: 10.0.x.3\n"
    );
    assert!(outcome.observer.probed().is_empty());
    assert_eq!(outcome.summary.invalid, 3);
    assert_eq!(outcome.summary.probed, 0);
    assert_eq!(outcome.observer.release_count(), 1);
}

/// A prefix that is itself a full address only becomes invalid once a
/// suffix is appended; the sweep still walks the whole range.
#[test]
fn four_octet_prefix_is_skipped_not_fatal() {
    let outcome = sweep(ScriptedTransport::new(), AddressRange::new("10.0.0.1", 1, 2));

    assert_eq!(
        outcome.stderr,
        "IP invalido: 10.0.0.1.1\nIP invalido: 10.0.0.1.2\n"
    );
    assert_eq!(outcome.summary.invalid, 2);
}

#[test]
fn dropping_unused_engine_releases_once() {
    let transport = ScriptedTransport::new();
    let observer = transport.observer();

    let engine = SweepEngine::new(transport, SweepConfig::default());
    assert_eq!(observer.release_count(), 0);
    engine.shutdown();

    assert_eq!(observer.release_count(), 1);
}

#[tokio::test]
async fn sweep_runs_on_blocking_pool() {
    let transport = ScriptedTransport::new().answer(addr(1), ReplyStatus::Success, 8);
    let observer = transport.observer();

    let stdout = tokio::task::spawn_blocking(move || {
        let mut reporter = WriterReporter::new(Vec::new(), Vec::new());
        SweepEngine::new(transport, SweepConfig::default())
            .run(&AddressRange::new("10.0.0", 1, 2), &mut reporter);
        let (out, _) = reporter.into_inner();
        String::from_utf8(out).unwrap()
    })
    .await
    .unwrap();

    assert_eq!(
        stdout,
        "Escaneando 10.0.0.1..2\n[+] Host ativo: 10.0.0.1 (tempo 8ms)\n"
    );
    assert_eq!(observer.probed(), vec![addr(1), addr(2)]);
    assert_eq!(observer.release_count(), 1);
}
