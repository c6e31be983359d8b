// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Well-known configuration parameter names.
//!
//! The setters here are shorthands for [`Builder::set_param()`]; like it,
//! they append, and never replace an earlier value.

use crate::record::Builder;

/// Whether the device starts in bootstrap mode. Integer; `1` or `0`.
pub const USE_BOOTSTRAP: &str = "mbed.UseBootstrap";
/// The account that owns the device. Integer; may exceed 64 bits.
pub const ACCOUNT_ID: &str = "mbed.AccountID";
/// The LwM2M endpoint name.
pub const ENDPOINT_NAME: &str = "mbed.EndpointName";
/// The device manufacturer.
pub const MANUFACTURER: &str = "mbed.Manufacturer";
/// The device model number.
pub const MODEL_NUMBER: &str = "mbed.ModelNumber";
/// The device type.
pub const DEVICE_TYPE: &str = "mbed.DeviceType";
/// The hardware revision.
pub const HARDWARE_VERSION: &str = "mbed.HardwareVersion";
/// Total device memory in KiB. Integer.
pub const MEMORY_TOTAL_KB: &str = "mbed.MemoryTotalKB";
/// The device serial number.
pub const SERIAL_NUMBER: &str = "mbed.SerialNumber";
/// Seconds since the Unix epoch at provisioning time. Integer.
pub const CURRENT_TIME: &str = "mbed.CurrentTime";
/// The device's UTC offset, such as `+02:00`.
pub const UTC_OFFSET: &str = "mbed.UTCOffset";
/// The device's time zone name.
pub const TIMEZONE: &str = "mbed.Timezone";
/// The bootstrap server URI.
pub const BOOTSTRAP_SERVER_URI: &str = "mbed.BootstrapServerURI";
/// The LwM2M server URI.
pub const LWM2M_SERVER_URI: &str = "mbed.LwM2MServerURI";

impl Builder<'_> {
    /// Appends `mbed.UseBootstrap`.
    pub fn set_bootstrap_mode(&mut self, mode: i64) -> &mut Self {
        self.set_param(USE_BOOTSTRAP, mode)
    }

    /// Appends `mbed.AccountID`.
    pub fn set_account_id(&mut self, id: i128) -> &mut Self {
        self.set_param(ACCOUNT_ID, id)
    }

    /// Appends `mbed.EndpointName`.
    pub fn set_endpoint_name(&mut self, name: &str) -> &mut Self {
        self.set_param(ENDPOINT_NAME, name)
    }

    /// Appends `mbed.Manufacturer`.
    pub fn set_manufacturer(&mut self, name: &str) -> &mut Self {
        self.set_param(MANUFACTURER, name)
    }

    /// Appends `mbed.ModelNumber`.
    pub fn set_model_number(&mut self, model: &str) -> &mut Self {
        self.set_param(MODEL_NUMBER, model)
    }

    /// Appends `mbed.DeviceType`.
    pub fn set_device_type(&mut self, ty: &str) -> &mut Self {
        self.set_param(DEVICE_TYPE, ty)
    }

    /// Appends `mbed.HardwareVersion`.
    pub fn set_hardware_version(&mut self, version: &str) -> &mut Self {
        self.set_param(HARDWARE_VERSION, version)
    }

    /// Appends `mbed.MemoryTotalKB`.
    pub fn set_memory_total_kb(&mut self, kb: i64) -> &mut Self {
        self.set_param(MEMORY_TOTAL_KB, kb)
    }

    /// Appends `mbed.SerialNumber`.
    pub fn set_serial_number(&mut self, serial: &str) -> &mut Self {
        self.set_param(SERIAL_NUMBER, serial)
    }

    /// Appends `mbed.CurrentTime`.
    pub fn set_current_time(&mut self, secs: u64) -> &mut Self {
        self.set_param(CURRENT_TIME, secs)
    }

    /// Appends `mbed.UTCOffset`.
    pub fn set_utc_offset(&mut self, offset: &str) -> &mut Self {
        self.set_param(UTC_OFFSET, offset)
    }

    /// Appends `mbed.Timezone`.
    pub fn set_timezone(&mut self, zone: &str) -> &mut Self {
        self.set_param(TIMEZONE, zone)
    }

    /// Appends `mbed.BootstrapServerURI`.
    pub fn set_bootstrap_uri(&mut self, uri: &str) -> &mut Self {
        self.set_param(BOOTSTRAP_SERVER_URI, uri)
    }

    /// Appends `mbed.LwM2MServerURI`.
    pub fn set_lwm2m_uri(&mut self, uri: &str) -> &mut Self {
        self.set_param(LWM2M_SERVER_URI, uri)
    }
}
