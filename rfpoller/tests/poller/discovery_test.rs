#[path = "../common/mod.rs"]
mod common;

use proptest::prelude::*;
use rfpoller::constants::MAX_DEVICES;
use rfpoller::prelude::*;
use rfpoller::test_support::poller_with_devices;

use common::fixtures;

#[test]
fn mixed_field_is_discovered_in_technology_order() {
    // NFC-A tag and NFC-V tag in the field at once.
    let mut poller = poller_with_devices(vec![
        fixtures::nfcv_device(),
        fixtures::nfca_device(NfcaType::T2t),
    ]);
    common::step_until(&mut poller, PollerState::Activation);

    assert_eq!(poller.devices().len(), 2);
    let uids: Vec<String> = poller.devices().iter().map(|d| d.info().id_hex()).collect();
    assert_eq!(
        uids,
        vec![
            hex::encode(fixtures::sample_nfcid1_bytes()),
            hex::encode(fixtures::sample_vicinity_uid_bytes()),
        ]
    );
    assert_eq!(
        poller.devices().get(0).unwrap().technology(),
        Technology::A
    );
    assert_eq!(
        poller.devices().get(1).unwrap().technology(),
        Technology::V
    );
}

#[test]
fn empty_field_never_reaches_activation() {
    let mut poller = poller_with_devices(vec![]);
    for _ in 0..16 {
        let state = poller.step();
        assert_ne!(state, PollerState::Activation);
        assert_ne!(state, PollerState::CollisionAvoidance);
    }
    assert!(poller.devices().is_empty());
}

#[test]
fn anticollision_is_told_the_remaining_capacity() {
    let mut devices: Vec<_> = (0..4).map(fixtures::nfcv_device_with).collect();
    devices.push(fixtures::nfca_device(NfcaType::T2t));
    let mut poller = poller_with_devices(devices);
    common::step_until(&mut poller, PollerState::Activation);

    assert_eq!(
        poller.driver().resolve_capacity_args,
        vec![
            (Technology::A, MAX_DEVICES),
            (Technology::V, MAX_DEVICES - 1)
        ]
    );
}

#[test]
fn detection_runs_all_four_technologies_in_order() {
    let mut poller = poller_with_devices(vec![fixtures::nfcb_device()]);
    common::step_until(&mut poller, PollerState::CollisionAvoidance);

    assert_eq!(
        poller.driver().initialized,
        vec![Technology::A, Technology::B, Technology::F, Technology::V]
    );
}

proptest! {
    // The device list never exceeds its capacity, whatever mix of
    // technologies anticollision yields.
    #[test]
    fn device_list_is_capacity_bounded(
        a in 0usize..8,
        f in 0usize..8,
        v in 0usize..8,
    ) {
        let mut devices = Vec::new();
        for i in 0..a {
            let mut id = fixtures::sample_nfcid1_bytes();
            id[0] = i as u8 + 1;
            devices.push(ListenInfo::NfcA {
                nfcid1: NfcId1::from_bytes(&id).unwrap(),
                ty: NfcaType::T2t,
                is_sleep: false,
            });
        }
        for i in 0..f {
            let mut id = fixtures::sample_nfcid2_bytes();
            id[7] = i as u8;
            devices.push(ListenInfo::NfcF {
                nfcid2: NfcId2::from_bytes(id),
                supports_nfc_dep: false,
            });
        }
        for i in 0..v {
            devices.push(fixtures::nfcv_device_with(i as u8));
        }
        let total = devices.len();

        let mut poller = poller_with_devices(devices);
        poller.step(); // Init
        poller.step(); // TechDetect
        if total > 0 {
            poller.step(); // CollisionAvoidance
        }

        prop_assert!(poller.devices().len() <= MAX_DEVICES);
        prop_assert_eq!(poller.devices().len(), total.min(MAX_DEVICES));
        for (tech, capacity) in &poller.driver().resolve_capacity_args {
            let _ = tech;
            prop_assert!(*capacity <= MAX_DEVICES);
        }
    }
}
