//! End-to-end behavior of deferred handles, the remote-reference
//! registry and typed proxies.

use latent_core::Error;
use latent_proxy::{Deferred, RemoteRefRegistry, TypedDeferred};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn handle_is_transparent_for_a_plain_integer() {
    let handle = Deferred::new(|| Ok(5_i64));
    assert!(handle == 5);
    assert_eq!((&handle + 1).unwrap(), 6);
    assert!(handle.is_truthy().unwrap());
    assert_eq!(handle.to_string(), "5");
}

#[test]
fn cross_handle_comparison_is_value_vs_value() {
    let three = Deferred::new(|| Ok(3_i64));
    let four = Deferred::new(|| Ok(4_i64));
    assert!(three < four);
    assert!(three != four);
    assert!(three.is_resolved() && four.is_resolved());
}

#[test]
fn resolution_happens_exactly_once_across_many_operations() {
    let calls = Arc::new(AtomicUsize::new(0));
    let producer_calls = Arc::clone(&calls);
    let handle = Deferred::new(move || {
        producer_calls.fetch_add(1, Ordering::SeqCst);
        Ok(42_i64)
    });

    assert!(handle == 42);
    assert!(handle < 100);
    assert_eq!((&handle * 2).unwrap(), 84);
    assert_eq!(handle.to_string(), "42");
    assert_eq!(handle.value().unwrap(), 42);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn producer_errors_reach_the_forcing_caller() {
    let handle: Deferred<String> = Deferred::new(|| {
        Err(anyhow::anyhow!("task parameters not published yet").into())
    });
    let err = handle.get().unwrap_err();
    assert!(matches!(err, Error::Resolve { .. }));
    assert!(err.to_string().contains("not published"));
}

#[test]
fn deferred_json_values_report_truthiness() {
    let empty = Deferred::new(|| Ok(json!({})));
    let populated = Deferred::new(|| Ok(json!({"lr": 0.1})));
    assert!(!empty.is_truthy().unwrap());
    assert!(populated.is_truthy().unwrap());
}

#[test]
fn flush_fires_every_pending_remote_reference_once() {
    let registry = RemoteRefRegistry::new();
    let fired = Arc::new(AtomicUsize::new(0));

    let handles: Vec<Deferred<i64>> = (0..3)
        .map(|i| {
            let fired = Arc::clone(&fired);
            Deferred::with_remote_ref(
                move || Ok(i),
                &registry,
                move || {
                    fired.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                },
            )
        })
        .collect();

    assert_eq!(registry.pending(), 3);
    assert_eq!(registry.flush_all(), 3);
    assert_eq!(fired.load(Ordering::SeqCst), 3);
    assert!(registry.is_empty());

    // Flushed references cannot fire again through their handles.
    for handle in &handles {
        assert!(!handle.trigger_remote_ref().unwrap());
    }
    assert_eq!(fired.load(Ordering::SeqCst), 3);
}

#[test]
fn triggered_remote_reference_leaves_registry_and_skips_flush() {
    let registry = RemoteRefRegistry::new();
    let fired = Arc::new(AtomicUsize::new(0));
    let fired_clone = Arc::clone(&fired);

    let handle = Deferred::with_remote_ref(
        || Ok(1_i64),
        &registry,
        move || {
            fired_clone.fetch_add(1, Ordering::SeqCst);
            Ok(())
        },
    );

    assert!(handle.trigger_remote_ref().unwrap());
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert!(registry.is_empty());

    // Triggering again is a no-op, as is a later flush.
    assert!(!handle.trigger_remote_ref().unwrap());
    assert_eq!(registry.flush_all(), 0);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn remote_reference_does_not_require_resolution() {
    let registry = RemoteRefRegistry::new();
    let resolved = Arc::new(AtomicUsize::new(0));
    let resolved_clone = Arc::clone(&resolved);

    let handle: Deferred<i64> = Deferred::with_remote_ref(
        move || {
            resolved_clone.fetch_add(1, Ordering::SeqCst);
            Ok(7)
        },
        &registry,
        || Ok(()),
    );

    assert!(handle.trigger_remote_ref().unwrap());
    assert_eq!(resolved.load(Ordering::SeqCst), 0);
    assert!(!handle.is_resolved());
}

#[test]
fn typed_proxy_reports_declared_type_without_forcing() {
    struct HyperParams {
        lr: f64,
    }

    let produced = Arc::new(AtomicUsize::new(0));
    let produced_clone = Arc::clone(&produced);
    let typed: TypedDeferred<HyperParams> = TypedDeferred::new(move || {
        produced_clone.fetch_add(1, Ordering::SeqCst);
        Ok(HyperParams { lr: 0.01 })
    });

    assert!(typed.is::<HyperParams>());
    assert!(!typed.is::<String>());
    assert_eq!(produced.load(Ordering::SeqCst), 0);

    let params = typed.get().unwrap();
    assert!((params.lr - 0.01).abs() < f64::EPSILON);
    assert_eq!(produced.load(Ordering::SeqCst), 1);
}

#[test]
fn handles_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Deferred<i64>>();
    assert_send_sync::<TypedDeferred<String>>();
    assert_send_sync::<RemoteRefRegistry>();
}
