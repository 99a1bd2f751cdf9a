#[path = "../common/mod.rs"]
mod common;

use rfpoller::driver::ScriptedStatus;
use rfpoller::prelude::*;
use rfpoller::test_support::poller_with_devices;

use common::fixtures;

#[test]
fn removed_device_ends_with_field_off_and_no_active_device() {
    let mut poller = poller_with_devices(vec![fixtures::nfcv_device()]);
    poller
        .driver_mut()
        .push_status(ScriptedStatus::Done(vec![0x00]));

    common::step_until(&mut poller, PollerState::Deactivation);
    assert_eq!(poller.step(), PollerState::Init);

    assert_eq!(poller.devices().active_index(), None);
    assert_eq!(poller.driver().field_off_count, 1);
    assert_eq!(poller.buffers().framing(), None);
    assert!(!poller.buffers().is_in_flight());
}

#[test]
fn isodep_device_is_deselected_on_the_way_out() {
    let mut poller = poller_with_devices(vec![fixtures::nfca_device(NfcaType::T4t)]);
    common::step_until(&mut poller, PollerState::Deactivation);
    poller.step();

    assert_eq!(poller.driver().deselects, 1);
    assert_eq!(poller.driver().releases, 0);
}

#[test]
fn nfcdep_device_is_released_on_the_way_out() {
    let mut poller = poller_with_devices(vec![fixtures::nfcf_device(true)]);
    common::step_until(&mut poller, PollerState::Deactivation);
    poller.step();

    assert_eq!(poller.driver().releases, 1);
    assert_eq!(poller.driver().deselects, 0);
}

#[test]
fn failed_release_never_blocks_the_field_off() {
    let mut poller = poller_with_devices(vec![fixtures::nfcf_device(true)]);
    poller.driver_mut().fail_release = true;
    common::step_until(&mut poller, PollerState::Deactivation);
    assert_eq!(poller.step(), PollerState::Init);

    assert_eq!(poller.driver().releases, 1);
    assert_eq!(poller.driver().field_off_count, 1);
    assert_eq!(poller.devices().active_index(), None);
}

#[test]
fn next_cycle_starts_with_an_empty_device_list() {
    let mut poller = poller_with_devices(vec![fixtures::nfcv_device()]);
    common::step_until(&mut poller, PollerState::Deactivation);
    poller.step(); // back in Init
    poller.step(); // Init clears and moves to TechDetect
    assert_eq!(poller.state(), PollerState::TechDetect);
    assert!(poller.devices().is_empty());
}
