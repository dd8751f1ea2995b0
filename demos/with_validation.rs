// Validation example for settings-registry
//
// Run with: cargo run --example with_validation

use settings_registry::{
    DocsConfig, Setting, SettingRegistry, SettingsMap, generate_docs, validators,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let registry = SettingRegistry::builder()
        .setting(
            Setting::string("openshift-version")
                .description("Version tag to provision, e.g. v3.6.0")
                .validator(validators::matches_pattern(r"^v\d+\.\d+\.\d+$")?),
        )
        .setting(
            Setting::int("memory")
                .description("Memory in MB")
                .min(1024)
                .max(65536),
        )
        .setting(
            Setting::string("disk-size")
                .description("Disk size, e.g. 20g")
                .validator(validators::is_valid_disk_size),
        )
        .setting(
            Setting::string("iso-url")
                .description("Boot ISO location")
                .validator(validators::is_valid_url),
        )
        .setting(
            Setting::slice("insecure-registry")
                .validator(validators::each_item(validators::is_valid_cidr)),
        )
        .setting(
            Setting::bool("skip-registry-check").callback(|name, _old, new| {
                println!("   ⚠️  {name} changed to {new}, restart the VM to apply");
            }),
        )
        .build()?;

    println!("🔍 settings-registry Validation Example\n");

    let mut store = SettingsMap::new();
    let setter = registry.setter();

    let cases = [
        ("openshift-version", "v3.6.0"),
        ("openshift-version", "latest"),
        ("memory", "4096"),
        ("memory", "512"),
        ("disk-size", "40g"),
        ("disk-size", "forty"),
        ("iso-url", "https://example.com/boot.iso"),
        ("iso-url", "example.com/boot.iso"),
        ("insecure-registry", "172.30.0.0/16,10.0.0.0/8"),
        ("insecure-registry", "172.30.0.0/16,registry.local"),
        ("skip-registry-check", "true"),
    ];

    for (name, raw) in cases {
        println!("Setting {name} = {raw:?}");
        match setter.set(&mut store, name, raw) {
            Ok(()) => println!("   Success\n"),
            Err(e) => println!("   Error: {e}\n"),
        }
    }

    println!("{}", generate_docs(&registry, DocsConfig::new().with_title("Example Settings")));

    Ok(())
}
