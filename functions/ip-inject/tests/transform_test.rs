//! End-to-end tests for the IP injection function
//!
//! Each test feeds a ResourceList through the processor driver, exactly as
//! the binary does with stdin and stdout.

use crds::UPFDeploymentSpec;
use ip_inject::{InjectConfig, IpInjector};
use krm_fn::{run, ResourceList, Severity};

const INPUT: &str = r#"
apiVersion: config.kubernetes.io/v1
kind: ResourceList
items:
- apiVersion: ipam.nephio.org/v1alpha1
  kind: IPAllocation
  metadata:
    name: upf-1-n3
    namespace: default
    labels:
      nephio.org/interface: n3
  spec:
    kind: network
    addressFamily: ipv4
  status:
    allocatedprefix: 10.0.0.1/24
    gateway: 10.0.0.254
- apiVersion: ipam.nephio.org/v1alpha1
  kind: IPAllocation
  metadata:
    name: upf-1-internet
    namespace: default
    labels:
      nephio.org/interface: internet
  spec:
    kind: pool
  status:
    allocatedprefix: 100.64.0.0/16
- apiVersion: ipam.nephio.org/v1alpha1
  kind: IPAllocation
  metadata:
    name: upf-1-n6
    namespace: default
    labels:
      nephio.org/interface: n6
  status:
    allocatedprefix: 10.1.1.5/30
    gateway: 10.1.1.6
- apiVersion: nf.nephio.org/v1alpha1
  kind: UPFDeployment
  metadata:
    name: upf-1
    namespace: default
  spec:
    capacity:
      uplinkThroughput: 1G
      downlinkThroughput: 5G
    n3Interfaces:
    - name: n3
      ips: []
      gatewayIPs: []
    n4Interfaces:
    - name: n4
      ips:
      - 10.2.0.1/24
      gatewayIPs:
      - 10.2.0.254
    n6Interfaces:
    - dnn: internet
      ueIPPool: ""
      interface:
        name: n6
        ips: []
        gatewayIPs: []
- apiVersion: v1
  kind: ConfigMap
  metadata:
    name: unrelated
  data:
    n3Interfaces: keep-me
"#;

fn transform(input: &str) -> (ResourceList, String) {
    let mut output = Vec::new();
    let rl = run(&IpInjector::default(), input.as_bytes(), &mut output)
        .expect("Failed to run function");
    (rl, String::from_utf8(output).expect("Output is not UTF-8"))
}

#[test]
fn test_inject_allocations() {
    let (rl, _) = transform(INPUT);

    assert!(rl.results.is_empty(), "Unexpected results: {:?}", rl.results);
    assert_eq!(rl.items.len(), 5);

    let spec = UPFDeploymentSpec::from_object(&rl.items[3]).expect("Failed to read spec");
    assert_eq!(spec.n3_interfaces[0].ips, vec!["10.0.0.1/24".to_string()]);
    assert_eq!(spec.n3_interfaces[0].gateway_ips, vec!["10.0.0.254".to_string()]);
    // No allocation for n4: left as is
    assert_eq!(spec.n4_interfaces[0].ips, vec!["10.2.0.1/24".to_string()]);
    assert_eq!(spec.n6_interfaces[0].ue_ip_pool, "100.64.0.0/16");
    assert_eq!(spec.n6_interfaces[0].interface.ips, vec!["10.1.1.5/30".to_string()]);
    assert_eq!(spec.n6_interfaces[0].interface.gateway_ips, vec!["10.1.1.6".to_string()]);
    assert_eq!(spec.capacity.downlink_throughput.as_deref(), Some("5G"));

    assert_eq!(rl.items[4]["data"]["n3Interfaces"], "keep-me");
}

#[test]
fn test_output_is_a_resource_list() {
    let (rl, output) = transform(INPUT);
    let reparsed = ResourceList::from_yaml(&output).expect("Output is not a ResourceList");
    assert_eq!(reparsed, rl);
}

#[test]
fn test_rerun_is_byte_identical() {
    let (_, first) = transform(INPUT);
    let (rl, second) = transform(&first);

    assert!(rl.results.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_function_config_selects_label() {
    let input = r#"
apiVersion: config.kubernetes.io/v1
kind: ResourceList
items:
- apiVersion: ipam.nephio.org/v1alpha1
  kind: IPAllocation
  metadata:
    name: upf-1-n3
    labels:
      nephio.org/interface: wrong
      example.com/if: n3
  status:
    allocatedprefix: 10.0.0.1/24
    gateway: 10.0.0.254
- apiVersion: nf.nephio.org/v1alpha1
  kind: UPFDeployment
  metadata:
    name: upf-1
  spec:
    n3Interfaces:
    - name: n3
functionConfig:
  apiVersion: v1
  kind: ConfigMap
  metadata:
    name: ip-inject
  data:
    interfaceLabel: example.com/if
"#;
    let (rl, _) = transform(input);

    assert!(rl.results.is_empty());
    assert_eq!(rl.items[1]["spec"]["n3Interfaces"][0]["ips"][0], "10.0.0.1/24");
}

#[test]
fn test_invalid_function_config_leaves_items_unchanged() {
    let input = r#"
apiVersion: config.kubernetes.io/v1
kind: ResourceList
items:
- apiVersion: ipam.nephio.org/v1alpha1
  kind: IPAllocation
  metadata:
    name: upf-1-n3
    labels:
      nephio.org/interface: n3
  status:
    allocatedprefix: 10.0.0.1/24
    gateway: 10.0.0.254
- apiVersion: nf.nephio.org/v1alpha1
  kind: UPFDeployment
  metadata:
    name: upf-1
  spec:
    n3Interfaces:
    - name: n3
functionConfig:
  apiVersion: fn.kpt.dev/v1alpha1
  kind: SetIP
  metadata:
    name: ip-inject
"#;
    let before = ResourceList::from_yaml(input).expect("valid input");
    let (rl, _) = transform(input);

    assert_eq!(rl.items, before.items);
    assert_eq!(rl.results.len(), 1);
    assert_eq!(rl.results[0].severity, Severity::Error);
    assert!(rl.results[0].message.contains("ConfigMap"));
}

#[test]
fn test_partial_failures_are_reported() {
    let input = r#"
apiVersion: config.kubernetes.io/v1
kind: ResourceList
items:
- just a string
- apiVersion: ipam.nephio.org/v1alpha1
  kind: IPAllocation
  metadata:
    name: unlabelled
  status:
    allocatedprefix: 10.9.0.1/24
- apiVersion: ipam.nephio.org/v1alpha1
  kind: IPAllocation
  metadata:
    name: upf-1-n9
    labels:
      nephio.org/interface: n9
  status:
    allocatedprefix: 10.4.0.1/24
    gateway: 10.4.0.254
- apiVersion: nf.nephio.org/v1alpha1
  kind: UPFDeployment
  metadata:
    name: upf-1
  spec:
    n3Interfaces: {}
    n9Interfaces:
    - name: n9
"#;
    let (rl, _) = transform(input);

    assert_eq!(rl.items[0], "just a string");
    assert_eq!(rl.items[3]["spec"]["n9Interfaces"][0]["gatewayIPs"][0], "10.4.0.254");

    let severities: Vec<Severity> = rl.results.iter().map(|r| r.severity).collect();
    assert_eq!(severities, vec![Severity::Error, Severity::Warning, Severity::Error]);
    assert_eq!(rl.results[0].file.as_ref().map(|f| f.index), Some(0));
    assert_eq!(
        rl.results[2].field.as_ref().map(|f| f.path.as_str()),
        Some("spec.n3Interfaces")
    );
    assert!(rl.has_errors());
}

#[test]
fn test_explicit_config_is_used() {
    let input = INPUT.replace("nephio.org/interface", "example.com/if");
    let mut output = Vec::new();
    let injector = IpInjector::new(InjectConfig {
        interface_label: "example.com/if".to_string(),
    });
    let rl = run(&injector, input.as_bytes(), &mut output).expect("Failed to run function");

    assert!(rl.results.is_empty());
    assert_eq!(rl.items[3]["spec"]["n3Interfaces"][0]["ips"][0], "10.0.0.1/24");
}

#[test]
fn test_bare_gateway_reads_as_empty() {
    let input = r#"
apiVersion: config.kubernetes.io/v1
kind: ResourceList
items:
- apiVersion: ipam.nephio.org/v1alpha1
  kind: IPAllocation
  metadata:
    name: upf-1-internet
    labels:
      nephio.org/interface: internet
  status:
    allocatedprefix: 100.64.0.0/16
    gateway:
- apiVersion: nf.nephio.org/v1alpha1
  kind: UPFDeployment
  metadata:
    name: upf-1
  spec:
    n6Interfaces:
    - dnn: internet
      ueIPPool: ""
      interface:
        name: n6
"#;
    let (rl, _) = transform(input);

    assert!(rl.results.is_empty(), "Unexpected results: {:?}", rl.results);
    assert_eq!(rl.items[1]["spec"]["n6Interfaces"][0]["ueIPPool"], "100.64.0.0/16");
}

#[test]
fn test_tagged_item_does_not_block_injection() {
    let input = r#"
apiVersion: config.kubernetes.io/v1
kind: ResourceList
items:
- apiVersion: ipam.nephio.org/v1alpha1
  kind: IPAllocation
  metadata:
    name: upf-1-n3
    labels:
      nephio.org/interface: n3
  status:
    allocatedprefix: 10.0.0.1/24
    gateway: 10.0.0.254
- apiVersion: example.com/v1
  kind: Other
  metadata:
    name: custom
  spec: !Custom foo
- apiVersion: nf.nephio.org/v1alpha1
  kind: UPFDeployment
  metadata:
    name: upf-1
  spec:
    n3Interfaces:
    - name: n3
"#;
    let (rl, output) = transform(input);

    assert_eq!(rl.items[2]["spec"]["n3Interfaces"][0]["ips"][0], "10.0.0.1/24");
    assert_eq!(rl.items[2]["spec"]["n3Interfaces"][0]["gatewayIPs"][0], "10.0.0.254");

    // Reported once, by index, and carried through unchanged
    assert_eq!(rl.results.len(), 1);
    assert_eq!(rl.results[0].severity, Severity::Error);
    assert_eq!(rl.results[0].file.as_ref().map(|f| f.index), Some(1));
    assert!(output.contains("spec: !Custom foo"));
}
