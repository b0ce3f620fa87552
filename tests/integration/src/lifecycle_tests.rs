//! End-to-end lifecycle of a plugin through the reconcile flows

use collectd_conf::CONF_TRAILER;
use collectd_reconcile::{ReconcileOutcome, ReconcilerContext};
use collectd_store::ConfigStore;
use collectd_test_utils::{StoreFixture, TEST_NAMESPACE};
use pretty_assertions::assert_eq;

fn rendered(store: &collectd_store::MemoryStore) -> String {
    store
        .get_config_resource(TEST_NAMESPACE, &StoreFixture::selector())
        .unwrap()
        .rendered_conf()
        .unwrap()
        .to_string()
}

#[test]
fn plugin_lifecycle_end_to_end() {
    let store = StoreFixture::new()
        .with_global("Interval 10")
        .with_pod("collectd-node-1")
        .build();
    let ctx = ReconcilerContext::new(store.clone(), StoreFixture::selector());

    // Initial pass: global settings only.
    let report = ctx.reconcile_global(TEST_NAMESPACE).unwrap();
    assert_eq!(report.outcome, ReconcileOutcome::Pushed);
    assert_eq!(rendered(&store), format!("Interval 10\n{CONF_TRAILER}"));

    // A new plugin appears and gets reconciled.
    store.insert_plugin(collectd_store::PluginResource::new(
        TEST_NAMESPACE,
        "cpu",
        "<Plugin cpu>\n</Plugin>",
    ));
    let report = ctx.reconcile_plugin(TEST_NAMESPACE, "cpu").unwrap();
    assert_eq!(report.outcome, ReconcileOutcome::Pushed);
    assert_eq!(
        rendered(&store),
        format!("Interval 10\nLoadPlugin cpu\n<Plugin cpu>\n</Plugin>\n{CONF_TRAILER}")
    );
    assert!(
        report
            .actions
            .contains(&"Registered finalizer on cpu".to_string())
    );
    assert!(
        report
            .actions
            .contains(&"Pod collectd-node-1 must reload the new configuration".to_string())
    );

    // Nothing changed: no-op pass.
    let report = ctx.reconcile_plugin(TEST_NAMESPACE, "cpu").unwrap();
    assert_eq!(report.outcome, ReconcileOutcome::Unchanged);

    // Deletion: the plugin is marked, the configuration is rebuilt without
    // it (and without the global block), the finalizer is cleared.
    let mut plugin = store.get_plugin(TEST_NAMESPACE, "cpu").unwrap();
    plugin.marked_for_deletion = true;
    store.update_plugin(&plugin).unwrap();

    let report = ctx.reconcile_plugin(TEST_NAMESPACE, "cpu").unwrap();
    assert_eq!(report.outcome, ReconcileOutcome::Pushed);
    assert_eq!(rendered(&store), CONF_TRAILER);
    assert!(store.get_plugin(TEST_NAMESPACE, "cpu").unwrap().finalizers.is_empty());

    // The cluster collects the resource; the next global pass restores the
    // global block.
    store.remove_plugin(TEST_NAMESPACE, "cpu");
    let report = ctx.reconcile_global(TEST_NAMESPACE).unwrap();
    assert_eq!(report.outcome, ReconcileOutcome::Pushed);
    assert_eq!(rendered(&store), format!("Interval 10\n{CONF_TRAILER}"));
}

#[test]
fn reports_serialize_for_status_surfaces() {
    let store = StoreFixture::new()
        .with_unregistered_plugin("cpu", "c-body")
        .build();
    let ctx = ReconcilerContext::new(store, StoreFixture::selector());

    let report = ctx.reconcile_plugin(TEST_NAMESPACE, "cpu").unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["outcome"], "Pushed");
    assert_eq!(json["fingerprint"], report.fingerprint);
    assert!(json["actions"].as_array().unwrap().len() >= 2);
}

#[test]
fn fingerprint_is_stable_across_context_instances() {
    let build = || {
        StoreFixture::new()
            .with_global("Interval 10")
            .with_unregistered_plugin("cpu", "c-body")
            .build()
    };

    let store_a = build();
    let store_b = build();
    let ctx_a = ReconcilerContext::new(store_a, StoreFixture::selector());
    let ctx_b = ReconcilerContext::new(store_b, StoreFixture::selector());

    let a = ctx_a.reconcile_global(TEST_NAMESPACE).unwrap();
    let b = ctx_b.reconcile_global(TEST_NAMESPACE).unwrap();
    assert_eq!(a.fingerprint, b.fingerprint);
}
