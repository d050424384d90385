use anyhow::Result;
use kn_vsphere_kubernetes::crd;
use kube::CustomResourceExt;

fn main() -> Result<()> {
    print!(
        "{}",
        serde_yaml::to_string(&crd::vsphere_source::VSphereSource::crd())?
    );
    Ok(())
}
