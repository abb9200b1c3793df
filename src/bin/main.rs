#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use core::cell::RefCell;

use axp192::Axp192;
use embassy_executor::Spawner;
use embassy_time::Timer;
use esp_hal::{
    clock::CpuClock,
    delay::Delay,
    gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull},
    i2c::master::{Config as I2cConfig, I2c},
    spi::master::{Config as SpiConfig, Spi},
    time::Rate,
    timer::timg::TimerGroup,
};
use log::{LevelFilter, debug, error, info};
use st7789v2::{FrameBuffer, St7789};
use static_cell::StaticCell;
use stickshell_core::{
    input::InputDispatcher,
    launcher::Launcher,
    power_key::{PowerKeyLatch, PowerKeyMonitor},
    screen::LogicalButton,
    settings::{PersistedSettings, SettingsStore},
    shell::{BackRestartPolicy, Shell, ShellConfig},
};
use stickshell_hal_esp32s3::{
    platform::display::{ImageStore, LcdSurface},
    storage::flash_settings::FlashSettingsStore,
};

use apps::App;
use platform::BoardPlatform;

#[path = "main/apps.rs"]
mod apps;
#[path = "main/assets.rs"]
mod assets;
#[path = "main/platform.rs"]
mod platform;

const DISPLAY_SPI_HZ: u32 = 20_000_000;
const PMU_I2C_KHZ: u32 = 400;
const NAV_STACK_DEPTH: usize = 4;
const RENDER_PERIOD_MS: u64 = 5;
const LAUNCHER_TICK_MS: u64 = 2_000;
const BACK_RESTART: BackRestartPolicy = BackRestartPolicy::Never;

static FRAME: StaticCell<FrameBuffer> = StaticCell::new();
static DISPATCHER: InputDispatcher = InputDispatcher::new();

type BoardShell<'a> = Shell<BoardPlatform<'a>, App, NAV_STACK_DEPTH>;

#[panic_handler]
fn panic(_: &core::panic::PanicInfo) -> ! {
    loop {}
}

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    esp_println::logger::init_logger(LevelFilter::Info);
    esp_println::println!("boot: stickshell starting");

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 65536);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // PMU wiring: SDA=GPIO10, SCL=GPIO11
    let i2c = I2c::new(
        peripherals.I2C0,
        I2cConfig::default().with_frequency(Rate::from_khz(PMU_I2C_KHZ)),
    )
    .unwrap()
    .with_sda(peripherals.GPIO10)
    .with_scl(peripherals.GPIO11);

    let mut pmu = match Axp192::new(i2c) {
        Ok(pmu) => pmu,
        Err(err) => {
            // The PMU owns the battery, backlight and power key; there is
            // no degraded mode worth running without it.
            error!("pmu: probe failed: {:?}", err);
            loop {
                Timer::after_secs(1).await;
            }
        }
    };

    if let Err(err) = pmu.enable_adc(true) {
        info!("pmu: adc enable failed: {:?}", err);
    }
    if let Err(err) = pmu.enable_coulomb_counter(true) {
        info!("pmu: coulomb counter enable failed: {:?}", err);
    }
    // Drop the stale power-on latch bits before the monitor ever polls.
    if let Err(err) = pmu.clear_power_key_latch() {
        info!("pmu: boot latch clear failed: {:?}", err);
    }

    let mut settings_store = match FlashSettingsStore::new() {
        Ok(store) => Some(store),
        Err(err) => {
            info!("settings storage unavailable: {:?}", err);
            None
        }
    };

    let mut stored: Option<PersistedSettings> = None;
    if let Some(store) = settings_store.as_mut() {
        match store.load() {
            Ok(Some(saved)) => {
                info!("settings: restored brightness={}", saved.brightness);
                stored = Some(saved);
            }
            Ok(None) => info!("settings: nothing persisted yet"),
            Err(err) => info!("settings: load failed: {:?}", err),
        }
    }
    let settings = stored.unwrap_or_default();
    if stored.is_none()
        && let Some(store) = settings_store.as_mut()
        && store.save(&settings).is_err()
    {
        info!("settings: seed save failed");
    }

    if let Err(err) = pmu.set_screen_brightness(settings.brightness) {
        info!("pmu: brightness apply failed: {:?}", err);
    }

    // Display wiring: CLK=GPIO13, MOSI=GPIO15, DC=GPIO14, CS=GPIO5
    let dc = Output::new(peripherals.GPIO14, Level::Low, OutputConfig::default());
    let cs = Output::new(peripherals.GPIO5, Level::High, OutputConfig::default());
    let spi_config = SpiConfig::default()
        .with_frequency(Rate::from_hz(DISPLAY_SPI_HZ))
        // ST7789V2 uses CPOL=0, CPHA=0.
        .with_mode(esp_hal::spi::Mode::_0);
    let spi = Spi::new(peripherals.SPI2, spi_config)
        .unwrap()
        .with_sck(peripherals.GPIO13)
        .with_mosi(peripherals.GPIO15);

    let mut images = ImageStore::new();
    assets::register_all(&mut images);

    let frame = FRAME.init(FrameBuffer::new());
    let mut surface = LcdSurface::new(St7789::new(spi, dc, cs), Delay::new(), frame, images);
    if let Err(err) = surface.initialize() {
        info!("display: initialize failed: {:?}", err);
    }

    // Buttons are pulled up and read low while pressed.
    // Wiring: PRIMARY=GPIO37, SECONDARY=GPIO39
    let input_cfg = InputConfig::default().with_pull(Pull::Up);
    let mut primary = Input::new(peripherals.GPIO37, input_cfg);
    let mut secondary = Input::new(peripherals.GPIO39, input_cfg);

    let pmu = RefCell::new(pmu);
    let platform = RefCell::new(BoardPlatform::new(surface, &pmu));
    let shell: RefCell<BoardShell<'_>> = RefCell::new(Shell::new(
        App::Launcher(Launcher::new()),
        ShellConfig::new().with_back_restart(BACK_RESTART),
    ));

    info!(
        "shell started: stack_depth={} brightness={} back_restart={:?}",
        NAV_STACK_DEPTH, settings.brightness, BACK_RESTART
    );
    info!("Display pins: CLK=GPIO13 MOSI=GPIO15 DC=GPIO14 CS=GPIO5");
    info!("PMU pins: SDA=GPIO10 SCL=GPIO11");
    info!("Button pins: PRIMARY=GPIO37 SECONDARY=GPIO39");

    let render_future = async {
        loop {
            {
                let mut shell = shell.borrow_mut();
                let mut platform = platform.borrow_mut();
                shell.service_frame(&mut platform);
            }
            Timer::after_millis(RENDER_PERIOD_MS).await;
        }
    };

    let power_future = async {
        let mut monitor = PowerKeyMonitor::new();
        loop {
            Timer::after_millis(PowerKeyMonitor::POLL_PERIOD_MS).await;

            let status = match pmu.borrow_mut().take_power_key_status() {
                Ok(status) => status,
                Err(err) => {
                    // Skipped tick; the monitor state is left untouched.
                    debug!("pmu: power-key poll skipped: {:?}", err);
                    continue;
                }
            };

            let events = monitor.observe(PowerKeyLatch {
                short_press: status.short_press,
                long_press: status.long_press,
            });

            // Both bits can latch in one tick; the long press is served
            // first, then the short press still maps to back.
            if events.long_press {
                info!("power: long press, cutting rails for sleep");
                if let Err(err) = pmu.borrow_mut().enter_sleep_mode() {
                    error!("power: sleep entry failed: {:?}", err);
                }
            }

            if events.short_press {
                let outcome = shell.borrow_mut().handle_back();
                debug!(
                    "back: handled={} popped={}",
                    outcome.handled, outcome.popped
                );
                if outcome.restart_requested {
                    info!("back: restart requested by policy");
                    esp_hal::system::software_reset();
                }
            }
        }
    };

    let primary_future = async {
        loop {
            primary.wait_for_any_edge().await;
            let mut shell = shell.borrow_mut();
            let _ = DISPATCHER.on_edge(&mut shell, LogicalButton::Primary, primary.is_high());
        }
    };

    let secondary_future = async {
        loop {
            secondary.wait_for_any_edge().await;
            let mut shell = shell.borrow_mut();
            let _ = DISPATCHER.on_edge(&mut shell, LogicalButton::Secondary, secondary.is_high());
        }
    };

    // Wall-time tick so the battery readout refreshes without input.
    let tick_future = async {
        loop {
            Timer::after_millis(LAUNCHER_TICK_MS).await;
            let mut shell = shell.borrow_mut();
            let redraw = match shell.current_mut() {
                App::Launcher(launcher) => launcher.periodic_tick(),
                _ => false,
            };
            if redraw {
                shell.invalidate();
            }
        }
    };

    let _ = embassy_futures::join::join5(
        render_future,
        power_future,
        primary_future,
        secondary_future,
        tick_future,
    )
    .await;
    unreachable!()
}
