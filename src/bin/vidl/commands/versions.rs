//! `vidl versions` command

use anyhow::Result;

use crate::cli::VersionsArgs;
use versioned_idl::Interface;

pub fn execute(args: VersionsArgs) -> Result<()> {
    let (registry, _) = super::load(&args.manifest)?;

    for iface in registry.iter() {
        println!("{}", describe(iface)?);
    }

    Ok(())
}

fn describe(iface: &Interface) -> Result<String> {
    if iface.unstable {
        return Ok(format!("{}: unstable", iface.name));
    }

    let frozen = iface.frozen_versions();
    let latest = if iface.has_version() {
        iface.latest_version()?.to_string()
    } else {
        "none".to_string()
    };

    let mut vndk = "none".to_string();
    for version in iface.all_versions() {
        if iface.is_module_for_vndk(&version)? {
            vndk = iface.versioned_name(&version);
        }
    }

    Ok(format!(
        "{}: frozen [{}], next {}, latest {}, vndk {}",
        iface.name,
        frozen.join(", "),
        iface.next_version(),
        latest,
        vndk
    ))
}
