// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use anyhow::{Context, Result};
use smart_ioctl_rs::{
    cfg::{
        cli::resolve_config_path,
        config::{Config, DeviceConfig, Report, RuntimeConfig},
        logger::init_logger,
    },
    device::Device,
    utils::format_size,
};
use tracing::{info, warn};

fn main() -> Result<()> {
    let _init_logger = init_logger("tests/config_logger.yaml")?;

    let config = resolve_config_path("tests/config.yaml")
        .and_then(Config::load_from_file)
        .context("failed to resolve or load config")?;

    for dev_cfg in &config.devices {
        if let Err(e) = report_device(dev_cfg, &config.runtime) {
            warn!(device = %dev_cfg.name, "report failed: {e:#}");
        }
    }
    Ok(())
}

fn report_device(cfg: &DeviceConfig, runtime: &RuntimeConfig) -> Result<()> {
    let path = cfg.target.path();
    let device = Device::open(&path, cfg.access_mode(), cfg.share_mode())
        .with_context(|| format!("failed to open {path}"))?;
    info!(device = %cfg.name, path = %path, kind = ?device.kind(), "opened");

    let disc = device.disc();
    if cfg.wants(Report::Geometry) {
        match disc.geometry_ex() {
            Ok(g) => println!(
                "[{}] geometry: {:?}, size {}",
                cfg.name,
                g.geometry.media_type(),
                format_size(g.disk_size.get().max(0) as u64)
            ),
            Err(e) => warn!("geometry: {e}"),
        }
        match disc.is_writable() {
            Ok(w) => println!("[{}] writable: {w}", cfg.name),
            Err(e) => warn!("writable: {e}"),
        }
        match device.is_device_on() {
            Ok(on) => println!("[{}] powered on: {on}", cfg.name),
            Err(e) => warn!("power state: {e}"),
        }
    }

    if cfg.wants(Report::Performance) {
        let mut perf = disc.performance();
        match perf.query() {
            Ok(p) => println!(
                "[{}] performance: read {} in {} ops, written {} in {} ops",
                cfg.name,
                format_size(p.bytes_read.get().max(0) as u64),
                p.read_count.get(),
                format_size(p.bytes_written.get().max(0) as u64),
                p.write_count.get()
            ),
            Err(e) => warn!("performance: {e}"),
        }
    }

    if cfg.wants(Report::Smart) {
        match disc.smart(runtime.smart_drive_number) {
            Ok(Some(smart)) => {
                if let Ok(id) = smart.identify() {
                    println!(
                        "[{}] model {:?} serial {:?} firmware {:?}",
                        cfg.name,
                        id.model(),
                        id.serial(),
                        id.firmware()
                    );
                }
                match smart.iterate_paired() {
                    Ok(pairs) => {
                        for p in pairs.filter(|p| !p.is_empty()) {
                            println!(
                                "[{}] {:#04x} {:<40} value {:>3} worst {:>3} thresh {:>3} raw {}{}",
                                cfg.name,
                                p.id(),
                                p.name(),
                                p.attribute.value,
                                p.attribute.worst,
                                p.threshold.threshold,
                                p.attribute.raw_value(),
                                if p.is_failing() { " FAILING" } else { "" }
                            );
                        }
                    },
                    Err(e) => warn!("smart attributes: {e}"),
                }
                match smart.health_status() {
                    Ok(h) => println!("[{}] health: {h:?}", cfg.name),
                    Err(e) => warn!("smart health: {e}"),
                }
            },
            Ok(None) => info!(device = %cfg.name, "S.M.A.R.T. not supported"),
            Err(e) => warn!("smart: {e}"),
        }
    }

    let storage = device.storage();
    if cfg.wants(Report::Storage) {
        match storage.device_number() {
            Ok(n) => println!(
                "[{}] device {:?} number {} partition {:?}",
                cfg.name,
                n.device_type(),
                n.device_number.get(),
                n.partition()
            ),
            Err(e) => warn!("device number: {e}"),
        }
        match storage.predict_failure() {
            Ok(p) => println!(
                "[{}] failure predicted: {}",
                cfg.name,
                p.is_failure_predicted()
            ),
            Err(e) => warn!("predict failure: {e}"),
        }
    }

    if cfg.wants(Report::Properties) {
        let props = storage.properties();
        match props.device() {
            Ok(Some(d)) => println!(
                "[{}] bus {:?} vendor {:?} product {:?} removable {}",
                cfg.name,
                d.bus_type(),
                d.vendor_id().ok().flatten(),
                d.product_id().ok().flatten(),
                d.is_removable()
            ),
            Ok(None) => info!(device = %cfg.name, "no device descriptor"),
            Err(e) => warn!("device descriptor: {e}"),
        }
        if let Ok(Some(s)) = props.seek_penalty() {
            println!("[{}] seek penalty: {}", cfg.name, s.incurs_seek_penalty());
        }
        if let Ok(Some(t)) = props.trim() {
            println!("[{}] trim: {}", cfg.name, t.trim_enabled());
        }
    }

    if cfg.wants(Report::Volume) && device.kind().is_volume() {
        let volume = device.volume();
        match volume.disk_extents() {
            Ok(x) => println!("[{}] extents on disks {:?}", cfg.name, x.disk_numbers()),
            Err(e) => warn!("extents: {e}"),
        }
    }

    if let Some(fs) = device.file_system().filter(|_| cfg.wants(Report::FileSystem)) {
        match fs.ntfs_volume_data() {
            Ok(n) => println!(
                "[{}] ntfs: {} free of {}",
                cfg.name,
                format_size(n.free_bytes()),
                format_size(n.total_bytes())
            ),
            Err(e) => warn!("ntfs data: {e}"),
        }
        let mut clusters = 0u64;
        for page in fs.volume_bitmap(runtime.bitmap_page_bytes) {
            match page {
                Ok(p) => clusters += p.clusters(),
                Err(e) => {
                    warn!("bitmap: {e}");
                    break;
                },
            }
        }
        println!("[{}] bitmap clusters: {clusters}", cfg.name);
    }

    Ok(())
}
