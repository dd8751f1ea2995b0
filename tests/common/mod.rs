//! Common test utilities for settings-registry integration tests
//!
//! Provides a registry of VM settings and a pre-populated store.

#![allow(dead_code)]

use settings_registry::{Setting, SettingRegistry, SettingValue, SettingsMap, validators};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Route `log` output through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// =============================================================================
// Test Registry
// =============================================================================

/// The settings a VM management tool would register
pub fn vm_settings() -> Vec<Setting> {
    vec![
        Setting::string("vm-driver")
            .description("Hypervisor driver used to create the VM")
            .validator(validators::is_one_of(&[
                "kvm",
                "virtualbox",
                "xhyve",
                "hyperv",
            ])),
        Setting::int("cpus")
            .description("Number of CPU cores")
            .validator(validators::is_positive),
        Setting::int("memory")
            .description("Memory in MB")
            .validator(validators::is_positive)
            .min(1024),
        Setting::string("disk-size").validator(validators::is_valid_disk_size),
        Setting::string("iso-url").validator(validators::is_valid_url),
        Setting::bool("show-libmachine-logs"),
        Setting::slice("insecure-registry"),
        Setting::slice("docker-env"),
        Setting::new("log-level"),
    ]
}

pub fn vm_registry() -> SettingRegistry {
    init_logging();
    SettingRegistry::new(vm_settings()).expect("vm registry is valid")
}

/// A store as it might look after loading a config file
pub fn vm_store() -> SettingsMap {
    let mut store = SettingsMap::new();
    store.insert("vm-driver".into(), SettingValue::from("kvm"));
    store.insert("cpus".into(), SettingValue::Int(12));
    store.insert("show-libmachine-logs".into(), SettingValue::Bool(true));
    store
}

// =============================================================================
// Callback Fixture
// =============================================================================

/// Registry whose "cpus" setting counts change notifications
pub struct CountingFixture {
    pub registry: SettingRegistry,
    pub changes: Arc<AtomicUsize>,
}

impl CountingFixture {
    pub fn new() -> Self {
        init_logging();
        let changes = Arc::new(AtomicUsize::new(0));
        let counter = changes.clone();

        let registry = SettingRegistry::builder()
            .setting(
                Setting::int("cpus")
                    .validator(validators::is_positive)
                    .callback(move |_name, _old, _new| {
                        counter.fetch_add(1, Ordering::SeqCst);
                    }),
            )
            .build()
            .expect("counting registry is valid");

        Self { registry, changes }
    }

    pub fn changes(&self) -> usize {
        self.changes.load(Ordering::SeqCst)
    }
}
