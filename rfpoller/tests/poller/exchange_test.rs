#[path = "../common/mod.rs"]
mod common;

use proptest::prelude::*;
use rfpoller::constants::{LLCP_SYMM, T4T_SELECT_REQ};
use rfpoller::driver::ScriptedStatus;
use rfpoller::prelude::*;
use rfpoller::test_support::poller_with_devices;

use common::fixtures;

#[test]
fn t2t_presence_check_sends_a_raw_block_read() {
    let mut poller = poller_with_devices(vec![fixtures::nfca_device(NfcaType::T2t)]);
    poller
        .driver_mut()
        .push_status(ScriptedStatus::Done(vec![0x00; 16]));
    common::step_until(&mut poller, PollerState::ExchangeCheck);

    let (interface, frame) = &poller.driver().started[0];
    assert_eq!(*interface, RfInterface::RawRf);
    assert_eq!(frame.as_slice(), &[0x30, 0x00]);
}

#[test]
fn t4t_presence_check_sends_the_select_apdu() {
    let mut poller = poller_with_devices(vec![fixtures::nfca_device(NfcaType::T4t)]);
    common::step_until(&mut poller, PollerState::ExchangeCheck);

    let (interface, frame) = &poller.driver().started[0];
    assert_eq!(*interface, RfInterface::IsoDep);
    assert_eq!(frame.as_slice(), &T4T_SELECT_REQ);
}

#[test]
fn p2p_presence_check_sends_llcp_symm() {
    let mut poller = poller_with_devices(vec![fixtures::nfcf_device(true)]);
    common::step_until(&mut poller, PollerState::ExchangeCheck);

    let (interface, frame) = &poller.driver().started[0];
    assert_eq!(*interface, RfInterface::NfcDep);
    assert_eq!(frame.as_slice(), &LLCP_SYMM);
}

#[test]
fn successful_checks_repeat_until_the_device_disappears() {
    let mut poller = poller_with_devices(vec![fixtures::nfcv_device()]);
    for _ in 0..3 {
        poller
            .driver_mut()
            .push_status(ScriptedStatus::Done(vec![0x00, 0x0F]));
    }

    // Three answered checks, then the exhausted script times out.
    common::step_until(&mut poller, PollerState::Deactivation);
    assert_eq!(poller.driver().started.len(), 4);
}

#[test]
fn staged_framing_always_matches_the_started_interface() {
    let mut poller = poller_with_devices(vec![fixtures::nfca_device(NfcaType::NfcDep)]);
    poller
        .driver_mut()
        .push_status(ScriptedStatus::Done(vec![0x00, 0x00]));
    common::step_until(&mut poller, PollerState::ExchangeCheck);

    assert_eq!(poller.buffers().framing(), Some(RfInterface::NfcDep));
    assert!(poller.buffers().is_in_flight());
    poller.step();
    assert!(!poller.buffers().is_in_flight());
}

#[test]
fn received_payload_is_exposed_after_done() {
    let mut poller = poller_with_devices(vec![fixtures::nfcv_device()]);
    poller
        .driver_mut()
        .push_status(ScriptedStatus::Done(vec![0x04, 0x91, 0x57]));
    common::step_until(&mut poller, PollerState::ExchangeCheck);
    common::step_until(&mut poller, PollerState::ExchangeStart);

    assert_eq!(poller.received().unwrap(), &[0x04, 0x91, 0x57]);
}

proptest! {
    // Whatever NFCID2 discovery produced, the T3T check frame echoes it
    // verbatim right after the command byte.
    #[test]
    fn t3t_check_frame_echoes_the_nfcid2(id in prop::array::uniform8(any::<u8>())) {
        let mut poller = poller_with_devices(vec![ListenInfo::NfcF {
            nfcid2: NfcId2::from_bytes(id),
            supports_nfc_dep: false,
        }]);
        common::step_until(&mut poller, PollerState::ExchangeCheck);

        let (interface, frame) = &poller.driver().started[0];
        prop_assert_eq!(*interface, RfInterface::RawRf);
        prop_assert_eq!(frame[0], 0x06);
        prop_assert_eq!(&frame[1..9], &id);
    }
}
