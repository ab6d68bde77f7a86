//! `vidl resolve` command

use anyhow::{anyhow, Result};

use crate::cli::ResolveArgs;
use versioned_idl::core::imports_with_version;

pub fn execute(args: ResolveArgs) -> Result<()> {
    let (registry, _) = super::load(&args.manifest)?;

    let iface = registry.get(&args.interface).ok_or_else(|| {
        anyhow!(
            "no interface named `{}` in {}",
            args.interface,
            args.manifest.display()
        )
    })?;
    let version = args.version.unwrap_or_else(|| iface.next_version());

    for import in imports_with_version(&registry, iface, &version)? {
        println!("{}", import);
    }

    Ok(())
}
