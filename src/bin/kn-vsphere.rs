use anyhow::Result;

fn main() -> Result<()> {
    kn_vsphere_cmd::cmd::run()?;
    Ok(())
}
