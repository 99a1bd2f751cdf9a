#[path = "../common/mod.rs"]
mod common;

use rfpoller::constants::NFCID3;
use rfpoller::prelude::*;
use rfpoller::test_support::poller_with_devices;

use common::fixtures;

#[test]
fn t2t_activates_on_raw_interface_without_handshake() {
    let mut poller = poller_with_devices(vec![fixtures::nfca_device(NfcaType::T2t)]);
    common::step_until(&mut poller, PollerState::ExchangeStart);

    let record = poller.devices().active().unwrap();
    assert_eq!(record.interface(), Some(RfInterface::RawRf));
    assert_eq!(poller.driver().isodep_activations, 0);
    assert!(poller.driver().nfcdep_nfcids.is_empty());
}

#[test]
fn activation_marks_exactly_one_device_active() {
    let mut poller = poller_with_devices(vec![
        fixtures::nfca_device(NfcaType::T2t),
        fixtures::nfcv_device(),
    ]);
    common::step_until(&mut poller, PollerState::ExchangeStart);

    assert_eq!(poller.devices().active_index(), Some(0));
    assert_eq!(poller.devices().get(1).unwrap().interface(), None);
}

#[test]
fn t4t_isodep_failure_leaves_no_active_device() {
    let mut poller = poller_with_devices(vec![fixtures::nfca_device(NfcaType::T4t)]);
    poller.driver_mut().fail_isodep = true;
    common::step_until(&mut poller, PollerState::Activation);

    assert_eq!(poller.step(), PollerState::Deactivation);
    assert_eq!(poller.devices().active_index(), None);
    assert_eq!(poller.devices().get(0).unwrap().interface(), None);
}

#[test]
fn sleeping_nfca_is_woken_before_select() {
    let mut poller =
        poller_with_devices(vec![fixtures::sleeping_nfca_device(NfcaType::T2t)]);
    common::step_until(&mut poller, PollerState::ExchangeStart);

    assert_eq!(poller.driver().wake_all_calls, 1);
    assert_eq!(
        poller.driver().selected[0].as_bytes(),
        &fixtures::sample_nfcid1_bytes()
    );
}

#[test]
fn nfcb_falls_back_to_raw_when_attrib_fails() {
    let mut poller = poller_with_devices(vec![fixtures::nfcb_device()]);
    poller.driver_mut().fail_isodep = true;
    common::step_until(&mut poller, PollerState::ExchangeStart);

    assert_eq!(
        poller.devices().active().unwrap().interface(),
        Some(RfInterface::RawRf)
    );
}

#[test]
fn nfcf_p2p_handshake_carries_its_nfcid2() {
    let mut poller = poller_with_devices(vec![fixtures::nfcf_device(true)]);
    common::step_until(&mut poller, PollerState::ExchangeStart);

    assert_eq!(
        poller.driver().nfcdep_nfcids,
        vec![fixtures::sample_nfcid2_bytes().to_vec()]
    );
    assert_eq!(
        poller.devices().active().unwrap().interface(),
        Some(RfInterface::NfcDep)
    );
}

#[test]
fn nfca_p2p_handshake_uses_the_default_nfcid3() {
    let mut poller = poller_with_devices(vec![fixtures::nfca_device(NfcaType::NfcDep)]);
    common::step_until(&mut poller, PollerState::ExchangeStart);

    assert_eq!(poller.driver().nfcdep_nfcids, vec![NFCID3.to_vec()]);
}
