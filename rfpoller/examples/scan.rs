// Discovery-loop demonstration over a scripted radio driver.

// This example walks the full poller cycle — detection, collision
// resolution, activation, a few presence-check exchanges, deactivation —
// against a MockDriver, so it runs without any RF front-end attached.
// Wire a real RadioDriver implementation (see `platform::init_hw` with
// `--features hw`) to run it against hardware.

use std::sync::Arc;

use anyhow::Result;
use rfpoller::driver::{MockDriver, MockInterruptService, ScriptedStatus};
use rfpoller::platform::{InterruptStatus, InterruptTransport, MockInterruptLine};
use rfpoller::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    // Shared interrupt status word plus the service thread feeding it.
    let status = Arc::new(InterruptStatus::new());
    let service = Arc::new(MockInterruptService::new(status.clone()));
    let (line, trigger) = MockInterruptLine::new();
    let irq = InterruptTransport::spawn(line, service)?;
    println!("Interrupt transport running: {}", irq.is_running());

    // Two devices in the field: an NFC-A T2T tag and an NFC-V tag.
    let mut driver = MockDriver::new().with_status(status);
    driver.add_device(ListenInfo::NfcA {
        nfcid1: NfcId1::from_bytes(&[0x01, 0x02, 0x03, 0x04])?,
        ty: NfcaType::T2t,
        is_sleep: false,
    });
    driver.add_device(ListenInfo::NfcV {
        uid: VicinityUid::from_bytes([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0x11, 0x22]),
    });
    // Three presence checks answer, then the tag is pulled away.
    for _ in 0..3 {
        driver.push_status(ScriptedStatus::Done(vec![0x04, 0x91, 0x57, 0x80]));
    }

    let config = PollerConfig {
        exchange_period_ms: 50,
        ..PollerConfig::default()
    };
    let mut poller = Poller::with_config(driver, config);

    println!("\n=== Running one discovery cycle ===");
    let mut steps = 0;
    loop {
        let state = poller.step();
        steps += 1;

        if state == PollerState::Activation {
            println!("Found {} device(s):", poller.devices().len());
            for (i, record) in poller.devices().iter().enumerate() {
                println!(
                    "  Device {}: {} UID = {}",
                    i + 1,
                    record.technology(),
                    record.info().id_hex()
                );
            }
        }
        if state == PollerState::ExchangeStart {
            if let Ok(payload) = poller.received() {
                if !payload.is_empty() {
                    println!("Presence check response: {}", bytes_to_hex_spaced(payload));
                }
            }
        }

        // One full cycle ends back in Init after the device disappears.
        if state == PollerState::Init && steps > 1 {
            break;
        }
        if steps > 10_000 {
            eprintln!("poller never completed a cycle");
            std::process::exit(1);
        }
    }

    // Fire one edge so the worker has something to drain on its next pass.
    trigger.fire()?;
    rfpoller::platform::timer::delay(20);
    poller.step();
    println!(
        "\nInterrupt bits drained by the worker: {:#04x}",
        poller.driver().drained_irq_bits
    );

    println!("Done after {steps} steps.");
    Ok(())
}
