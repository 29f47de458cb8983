// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use bitflags::bitflags;
use zerocopy::{
    FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned,
    byteorder::{I64, LittleEndian, U16, U32, U64},
};

use crate::{
    buffer::{BufferReader, StringEncoding},
    error::Result,
    models::Decodable,
};

/// Room for offset-addressed strings and raw properties behind a
/// variable-length descriptor.
pub const DESCRIPTOR_DATA_SIZE: usize = 1024;
/// Number of `DEVICE_MEDIA_INFO` slots requested from the media-types query.
pub const MAX_MEDIA_TYPES: usize = 10;

// ─────────────────────────────────────────────────────────────────────────────
// Property query

/// `STORAGE_PROPERTY_ID`
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoragePropertyId {
    Device = 0x0,
    Adapter = 0x1,
    DeviceId = 0x2,
    DeviceUniqueId = 0x3,
    WriteCache = 0x4,
    Miniport = 0x5,
    AccessAlignment = 0x6,
    SeekPenalty = 0x7,
    Trim = 0x8,
    WriteAggregation = 0x9,
    Telemetry = 0xA,
    LbProvisioning = 0xB,
    Power = 0xC,
    CopyOffload = 0xD,
    Resiliency = 0xE,
}

/// `STORAGE_QUERY_TYPE`
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageQueryType {
    Standard = 0,
    Exists = 1,
    Mask = 2,
}

/// `STORAGE_PROPERTY_QUERY`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct StoragePropertyQuery {
    pub property_id: U32<LittleEndian>,
    pub query_type: U32<LittleEndian>,
    pub additional_parameters: [u8; 1],
    pub _pad0: [u8; 3],
}

impl StoragePropertyQuery {
    pub fn new(property_id: StoragePropertyId, query_type: StorageQueryType) -> Self {
        Self {
            property_id: U32::new(property_id as u32),
            query_type: U32::new(query_type as u32),
            additional_parameters: [0],
            _pad0: [0; 3],
        }
    }
}

/// A descriptor returned by the property query.
///
/// Every descriptor starts with `Version` and `Size`; a zero `Size` means the
/// driver filled nothing.
pub trait StorageProperty: Decodable {
    const PROPERTY_ID: StoragePropertyId;

    fn descriptor_size(&self) -> u32;
}

macro_rules! storage_property {
    ($($ty:ty => $id:ident),* $(,)?) => {
        $(
            impl StorageProperty for $ty {
                const PROPERTY_ID: StoragePropertyId = StoragePropertyId::$id;

                #[inline]
                fn descriptor_size(&self) -> u32 {
                    self.size.get()
                }
            }
        )*
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// Descriptors

/// `STORAGE_BUS_TYPE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusType {
    Unknown,
    Scsi,
    Atapi,
    Ata,
    Ieee1394,
    Ssa,
    Fibre,
    Usb,
    Raid,
    IScsi,
    Sas,
    Sata,
    Sd,
    Mmc,
    Virtual,
    FileBackedVirtual,
    Spaces,
    Nvme,
    Other(u32),
}

impl From<u32> for BusType {
    fn from(v: u32) -> Self {
        match v {
            0x00 => Self::Unknown,
            0x01 => Self::Scsi,
            0x02 => Self::Atapi,
            0x03 => Self::Ata,
            0x04 => Self::Ieee1394,
            0x05 => Self::Ssa,
            0x06 => Self::Fibre,
            0x07 => Self::Usb,
            0x08 => Self::Raid,
            0x09 => Self::IScsi,
            0x0A => Self::Sas,
            0x0B => Self::Sata,
            0x0C => Self::Sd,
            0x0D => Self::Mmc,
            0x0E => Self::Virtual,
            0x0F => Self::FileBackedVirtual,
            0x10 => Self::Spaces,
            0x11 => Self::Nvme,
            other => Self::Other(other),
        }
    }
}

/// `STORAGE_DEVICE_DESCRIPTOR` with room for its offset-addressed strings.
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Clone, Copy)]
pub struct StorageDeviceDescriptor {
    pub version: U32<LittleEndian>,
    pub size: U32<LittleEndian>,
    pub device_type: u8,
    pub device_type_modifier: u8,
    pub removable_media: u8,
    pub command_queueing: u8,
    pub vendor_id_offset: U32<LittleEndian>,
    pub product_id_offset: U32<LittleEndian>,
    pub product_revision_offset: U32<LittleEndian>,
    pub serial_number_offset: U32<LittleEndian>,
    pub bus_type: U32<LittleEndian>,
    pub raw_properties_length: U32<LittleEndian>,
    pub raw_device_properties: [u8; DESCRIPTOR_DATA_SIZE],
}

impl StorageDeviceDescriptor {
    #[inline]
    pub fn bus_type(&self) -> BusType {
        BusType::from(self.bus_type.get())
    }

    #[inline]
    pub fn is_removable(&self) -> bool {
        self.removable_media != 0
    }

    pub fn vendor_id(&self) -> Result<Option<String>> {
        self.string_at(self.vendor_id_offset.get())
    }

    pub fn product_id(&self) -> Result<Option<String>> {
        self.string_at(self.product_id_offset.get())
    }

    pub fn product_revision(&self) -> Result<Option<String>> {
        self.string_at(self.product_revision_offset.get())
    }

    pub fn serial_number(&self) -> Result<Option<String>> {
        self.string_at(self.serial_number_offset.get())
    }

    /// Offsets are relative to the start of the descriptor; zero means the
    /// string is not present.
    fn string_at(&self, offset: u32) -> Result<Option<String>> {
        if offset == 0 {
            return Ok(None);
        }
        let s = BufferReader::new(self.as_bytes())
            .decode_string(offset as usize, StringEncoding::Ansi)?;
        Ok(Some(s.trim().to_string()))
    }
}

impl core::fmt::Debug for StorageDeviceDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StorageDeviceDescriptor")
            .field("size", &self.size.get())
            .field("device_type", &self.device_type)
            .field("removable_media", &self.removable_media)
            .field("bus_type", &self.bus_type())
            .field("vendor_id", &self.vendor_id().ok().flatten())
            .field("product_id", &self.product_id().ok().flatten())
            .field("serial_number", &self.serial_number().ok().flatten())
            .finish_non_exhaustive()
    }
}

/// `STORAGE_ADAPTER_DESCRIPTOR`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct StorageAdapterDescriptor {
    pub version: U32<LittleEndian>,
    pub size: U32<LittleEndian>,
    pub maximum_transfer_length: U32<LittleEndian>,
    pub maximum_physical_pages: U32<LittleEndian>,
    pub alignment_mask: U32<LittleEndian>,
    pub adapter_uses_pio: u8,
    pub adapter_scans_down: u8,
    pub command_queueing: u8,
    pub accelerated_transfer: u8,
    pub bus_type: u8,
    pub _pad0: [u8; 1],
    pub bus_major_version: U16<LittleEndian>,
    pub bus_minor_version: U16<LittleEndian>,
    pub srb_type: u8,
    pub address_type: u8,
}

impl StorageAdapterDescriptor {
    #[inline]
    pub fn bus_type(&self) -> BusType {
        BusType::from(self.bus_type as u32)
    }
}

/// `STORAGE_DEVICE_ID_DESCRIPTOR` with room for its identifier list.
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Clone, Copy)]
pub struct StorageDeviceIdDescriptor {
    pub version: U32<LittleEndian>,
    pub size: U32<LittleEndian>,
    pub number_of_identifiers: U32<LittleEndian>,
    pub identifiers: [u8; DESCRIPTOR_DATA_SIZE],
}

/// Fixed part of one `STORAGE_IDENTIFIER`.
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct StorageIdentifierHeader {
    pub code_set: U32<LittleEndian>,
    pub identifier_type: U32<LittleEndian>,
    pub identifier_size: U16<LittleEndian>,
    pub next_offset: U16<LittleEndian>,
    pub association: U32<LittleEndian>,
}

/// One device identifier (SCSI VPD page 0x83 designator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageIdentifier {
    pub code_set: u32,
    pub identifier_type: u32,
    pub association: u32,
    pub identifier: Vec<u8>,
}

impl StorageDeviceIdDescriptor {
    /// Walk the identifier chain through each entry's `NextOffset`.
    pub fn identifiers(&self) -> Result<Vec<StorageIdentifier>> {
        let reader = BufferReader::new(&self.identifiers);
        let count = self.number_of_identifiers.get() as usize;
        let mut out = Vec::with_capacity(count.min(16));
        let mut offset = 0usize;
        for _ in 0..count {
            let hdr: StorageIdentifierHeader = reader.decode(offset)?;
            let body = reader.bytes(
                offset + StorageIdentifierHeader::SIZE,
                hdr.identifier_size.get() as usize,
            )?;
            out.push(StorageIdentifier {
                code_set: hdr.code_set.get(),
                identifier_type: hdr.identifier_type.get(),
                association: hdr.association.get(),
                identifier: body.to_vec(),
            });
            match hdr.next_offset.get() {
                0 => break,
                next => offset += next as usize,
            }
        }
        Ok(out)
    }
}

impl core::fmt::Debug for StorageDeviceIdDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StorageDeviceIdDescriptor")
            .field("size", &self.size.get())
            .field("number_of_identifiers", &self.number_of_identifiers.get())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteCacheType {
    Unknown,
    None,
    WriteBack,
    WriteThrough,
    Other(u32),
}

impl From<u32> for WriteCacheType {
    fn from(v: u32) -> Self {
        match v {
            0 => Self::Unknown,
            1 => Self::None,
            2 => Self::WriteBack,
            3 => Self::WriteThrough,
            other => Self::Other(other),
        }
    }
}

/// Decodes the `Unknown / No / Yes` enums of the write-cache property.
#[inline]
fn tristate(v: u32) -> Option<bool> {
    match v {
        1 => Some(false),
        2 => Some(true),
        _ => None,
    }
}

/// `STORAGE_WRITE_CACHE_PROPERTY`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct StorageWriteCacheProperty {
    pub version: U32<LittleEndian>,
    pub size: U32<LittleEndian>,
    pub write_cache_type: U32<LittleEndian>,
    pub write_cache_enabled: U32<LittleEndian>,
    pub write_cache_changeable: U32<LittleEndian>,
    pub write_through_supported: U32<LittleEndian>,
    pub flush_cache_supported: u8,
    pub user_defined_power_protection: u8,
    pub nv_cache_enabled: u8,
    pub _pad0: [u8; 1],
}

impl StorageWriteCacheProperty {
    #[inline]
    pub fn cache_type(&self) -> WriteCacheType {
        WriteCacheType::from(self.write_cache_type.get())
    }

    #[inline]
    pub fn enabled(&self) -> Option<bool> {
        tristate(self.write_cache_enabled.get())
    }

    #[inline]
    pub fn changeable(&self) -> Option<bool> {
        tristate(self.write_cache_changeable.get())
    }

    #[inline]
    pub fn write_through(&self) -> Option<bool> {
        tristate(self.write_through_supported.get())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDriver {
    Unknown,
    Storport,
    ScsiPort,
    AtaPort,
    UsbPort,
    Sbp2Port,
    SdPort,
    Other(u32),
}

impl From<u32> for PortDriver {
    fn from(v: u32) -> Self {
        match v {
            0 => Self::Unknown,
            1 => Self::Storport,
            2 => Self::ScsiPort,
            3 => Self::AtaPort,
            4 => Self::UsbPort,
            5 => Self::Sbp2Port,
            6 => Self::SdPort,
            other => Self::Other(other),
        }
    }
}

/// `STORAGE_MINIPORT_DESCRIPTOR`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct StorageMiniportDescriptor {
    pub version: U32<LittleEndian>,
    pub size: U32<LittleEndian>,
    pub port_driver: U32<LittleEndian>,
    pub lun_reset_supported: u8,
    pub target_reset_supported: u8,
    pub io_timeout_value: U16<LittleEndian>,
}

impl StorageMiniportDescriptor {
    #[inline]
    pub fn port_driver(&self) -> PortDriver {
        PortDriver::from(self.port_driver.get())
    }
}

/// `STORAGE_ACCESS_ALIGNMENT_DESCRIPTOR`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct StorageAccessAlignmentDescriptor {
    pub version: U32<LittleEndian>,
    pub size: U32<LittleEndian>,
    pub bytes_per_cache_line: U32<LittleEndian>,
    pub bytes_offset_for_cache_alignment: U32<LittleEndian>,
    pub bytes_per_logical_sector: U32<LittleEndian>,
    pub bytes_per_physical_sector: U32<LittleEndian>,
    pub bytes_offset_for_sector_alignment: U32<LittleEndian>,
}

/// `DEVICE_SEEK_PENALTY_DESCRIPTOR`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct DeviceSeekPenaltyDescriptor {
    pub version: U32<LittleEndian>,
    pub size: U32<LittleEndian>,
    pub incurs_seek_penalty: u8,
    pub _pad0: [u8; 3],
}

impl DeviceSeekPenaltyDescriptor {
    /// Rotational media incur a seek penalty; solid-state media do not.
    #[inline]
    pub fn incurs_seek_penalty(&self) -> bool {
        self.incurs_seek_penalty != 0
    }
}

/// `DEVICE_TRIM_DESCRIPTOR`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct DeviceTrimDescriptor {
    pub version: U32<LittleEndian>,
    pub size: U32<LittleEndian>,
    pub trim_enabled: u8,
    pub _pad0: [u8; 3],
}

impl DeviceTrimDescriptor {
    #[inline]
    pub fn trim_enabled(&self) -> bool {
        self.trim_enabled != 0
    }
}

/// `DEVICE_WRITE_AGGREGATION_DESCRIPTOR`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct DeviceWriteAggregationDescriptor {
    pub version: U32<LittleEndian>,
    pub size: U32<LittleEndian>,
    pub benefits_from_write_aggregation: u8,
    pub _pad0: [u8; 3],
}

/// `DEVICE_POWER_DESCRIPTOR`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct DevicePowerDescriptor {
    pub version: U32<LittleEndian>,
    pub size: U32<LittleEndian>,
    pub device_attention_supported: u8,
    pub asynchronous_notification_supported: u8,
    pub idle_power_management_enabled: u8,
    pub d3_cold_enabled: u8,
    pub d3_cold_supported: u8,
    pub reserved: [u8; 3],
    pub idle_timeout_in_ms: U32<LittleEndian>,
}

/// `DEVICE_COPY_OFFLOAD_DESCRIPTOR`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct DeviceCopyOffloadDescriptor {
    pub version: U32<LittleEndian>,
    pub size: U32<LittleEndian>,
    pub maximum_token_lifetime: U32<LittleEndian>,
    pub default_token_lifetime: U32<LittleEndian>,
    pub maximum_transfer_size: U64<LittleEndian>,
    pub optimal_transfer_count: U64<LittleEndian>,
    pub maximum_data_descriptors: U32<LittleEndian>,
    pub maximum_transfer_length_per_descriptor: U32<LittleEndian>,
    pub optimal_transfer_length_per_descriptor: U32<LittleEndian>,
    pub optimal_transfer_length_granularity: U16<LittleEndian>,
    pub reserved: [u8; 2],
}

/// `STORAGE_DEVICE_RESILIENCY_DESCRIPTOR`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct StorageDeviceResiliencyDescriptor {
    pub version: U32<LittleEndian>,
    pub size: U32<LittleEndian>,
    pub name_offset: U32<LittleEndian>,
    pub number_of_logical_copies: U32<LittleEndian>,
    pub number_of_physical_copies: U32<LittleEndian>,
    pub physical_disk_redundancy: U32<LittleEndian>,
    pub number_of_columns: U32<LittleEndian>,
    pub interleave: U32<LittleEndian>,
}

storage_property! {
    StorageDeviceDescriptor => Device,
    StorageAdapterDescriptor => Adapter,
    StorageDeviceIdDescriptor => DeviceId,
    StorageWriteCacheProperty => WriteCache,
    StorageMiniportDescriptor => Miniport,
    StorageAccessAlignmentDescriptor => AccessAlignment,
    DeviceSeekPenaltyDescriptor => SeekPenalty,
    DeviceTrimDescriptor => Trim,
    DeviceWriteAggregationDescriptor => WriteAggregation,
    DevicePowerDescriptor => Power,
    DeviceCopyOffloadDescriptor => CopyOffload,
    StorageDeviceResiliencyDescriptor => Resiliency,
}

// ─────────────────────────────────────────────────────────────────────────────
// Storage class requests

/// `DEVICE_TYPE` reported by the storage stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDevice {
    CdRom,
    Controller,
    Disk,
    DiskFileSystem,
    FileSystem,
    Dvd,
    Changer,
    MassStorage,
    Tape,
    VirtualDisk,
    Unknown,
    Other(u32),
}

impl From<u32> for FileDevice {
    fn from(v: u32) -> Self {
        match v {
            0x02 => Self::CdRom,
            0x04 => Self::Controller,
            0x07 => Self::Disk,
            0x08 => Self::DiskFileSystem,
            0x09 => Self::FileSystem,
            0x1F => Self::Tape,
            0x22 => Self::Unknown,
            0x24 => Self::VirtualDisk,
            0x2D => Self::MassStorage,
            0x30 => Self::Changer,
            0x33 => Self::Dvd,
            other => Self::Other(other),
        }
    }
}

/// `STORAGE_DEVICE_NUMBER`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct StorageDeviceNumber {
    pub device_type: U32<LittleEndian>,
    pub device_number: U32<LittleEndian>,
    pub partition_number: U32<LittleEndian>,
}

impl StorageDeviceNumber {
    #[inline]
    pub fn device_type(&self) -> FileDevice {
        FileDevice::from(self.device_type.get())
    }

    /// `None` for devices that cannot be partitioned (reported as `-1`).
    #[inline]
    pub fn partition(&self) -> Option<u32> {
        match self.partition_number.get() {
            u32::MAX => None,
            n => Some(n),
        }
    }
}

/// `STORAGE_READ_CAPACITY`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct StorageReadCapacity {
    pub version: U32<LittleEndian>,
    pub size: U32<LittleEndian>,
    pub block_length: U32<LittleEndian>,
    pub _pad0: [u8; 4],
    pub number_of_blocks: I64<LittleEndian>,
    pub disk_length: I64<LittleEndian>,
}

/// `STORAGE_HOTPLUG_INFO`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct StorageHotplugInfo {
    pub size: U32<LittleEndian>,
    pub media_removable: u8,
    pub media_hotplug: u8,
    pub device_hotplug: u8,
    pub write_cache_enable_override: u8,
}

/// `STORAGE_PREDICT_FAILURE`
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Clone, Copy)]
pub struct StoragePredictFailure {
    pub predict_failure: U32<LittleEndian>,
    pub vendor_specific: [u8; 512],
}

impl StoragePredictFailure {
    /// Non-zero means the device predicts a failure.
    #[inline]
    pub fn is_failure_predicted(&self) -> bool {
        self.predict_failure.get() != 0
    }
}

impl core::fmt::Debug for StoragePredictFailure {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StoragePredictFailure")
            .field("predict_failure", &self.predict_failure.get())
            .finish_non_exhaustive()
    }
}

/// `MEDIA_SERIAL_NUMBER_DATA` with room for the serial number.
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Clone, Copy)]
pub struct MediaSerialNumberData {
    pub serial_number_length: U32<LittleEndian>,
    pub result: U32<LittleEndian>,
    pub reserved: [U32<LittleEndian>; 2],
    pub serial_number_data: [u8; DESCRIPTOR_DATA_SIZE],
}

impl MediaSerialNumberData {
    pub fn serial_bytes(&self) -> Result<&[u8]> {
        BufferReader::new(&self.serial_number_data)
            .bytes(0, self.serial_number_length.get() as usize)
    }

    pub fn serial(&self) -> Result<String> {
        let len = self.serial_number_length.get() as usize;
        let s = BufferReader::new(&self.serial_number_data).decode_fixed_string(
            0,
            len,
            StringEncoding::Ansi,
        )?;
        Ok(s.trim().to_string())
    }
}

impl core::fmt::Debug for MediaSerialNumberData {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MediaSerialNumberData")
            .field("serial_number_length", &self.serial_number_length.get())
            .field("result", &self.result.get())
            .finish_non_exhaustive()
    }
}

/// Input of the prevent-media-removal request (`PREVENT_MEDIA_REMOVAL`).
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct PreventMediaRemoval {
    pub prevent_media_removal: u8,
}

bitflags! {
    /// `MediaCharacteristics` of a media-info entry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MediaCharacteristics: u32 {
        const ERASEABLE         = 0x0000_0001;
        const WRITE_ONCE        = 0x0000_0002;
        const READ_ONLY         = 0x0000_0004;
        const READ_WRITE        = 0x0000_0008;
        const WRITE_PROTECTED   = 0x0000_0100;
        const CURRENTLY_MOUNTED = 0x8000_0000;
        const _ = !0;
    }
}

/// `GET_MEDIA_TYPES` with [`MAX_MEDIA_TYPES`] info slots.
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Clone, Copy)]
pub struct GetMediaTypes {
    pub device_type: U32<LittleEndian>,
    pub media_info_count: U32<LittleEndian>,
    pub media_info: [u8; 32 * MAX_MEDIA_TYPES],
}

/// Disk flavour of `DEVICE_MEDIA_INFO`.
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct DiskMediaInfo {
    pub cylinders: I64<LittleEndian>,
    pub media_type: U32<LittleEndian>,
    pub tracks_per_cylinder: U32<LittleEndian>,
    pub sectors_per_track: U32<LittleEndian>,
    pub bytes_per_sector: U32<LittleEndian>,
    pub number_media_sides: U32<LittleEndian>,
    pub media_characteristics: U32<LittleEndian>,
}

/// Tape flavour of `DEVICE_MEDIA_INFO`.
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, Copy)]
pub struct TapeMediaInfo {
    pub media_type: U32<LittleEndian>,
    pub media_characteristics: U32<LittleEndian>,
    pub current_block_size: U32<LittleEndian>,
    pub bus_type: U32<LittleEndian>,
    pub medium_type: u8,
    pub density_code: u8,
    pub reserved: [u8; 14],
}

#[derive(Debug, Clone, Copy)]
pub enum DeviceMediaInfo {
    Disk(DiskMediaInfo),
    Tape(TapeMediaInfo),
}

impl DeviceMediaInfo {
    pub fn characteristics(&self) -> MediaCharacteristics {
        let raw = match self {
            DeviceMediaInfo::Disk(d) => d.media_characteristics.get(),
            DeviceMediaInfo::Tape(t) => t.media_characteristics.get(),
        };
        MediaCharacteristics::from_bits_retain(raw)
    }
}

impl GetMediaTypes {
    #[inline]
    pub fn device_type(&self) -> FileDevice {
        FileDevice::from(self.device_type.get())
    }

    /// Decode every reported entry; the union flavour follows the device type.
    pub fn entries(&self) -> Result<Vec<DeviceMediaInfo>> {
        let reader = BufferReader::new(&self.media_info);
        let tape = self.device_type() == FileDevice::Tape;
        let mut cursor = 0usize;
        (0..self.media_info_count.get())
            .map(|_| -> Result<DeviceMediaInfo> {
                Ok(if tape {
                    DeviceMediaInfo::Tape(reader.decode_advancing(&mut cursor)?)
                } else {
                    DeviceMediaInfo::Disk(reader.decode_advancing(&mut cursor)?)
                })
            })
            .collect()
    }
}

impl core::fmt::Debug for GetMediaTypes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GetMediaTypes")
            .field("device_type", &self.device_type())
            .field("media_info_count", &self.media_info_count.get())
            .field("entries", &self.entries().ok())
            .finish()
    }
}

decodable! {
    StoragePropertyQuery => "STORAGE_PROPERTY_QUERY",
    StorageDeviceDescriptor => "STORAGE_DEVICE_DESCRIPTOR",
    StorageAdapterDescriptor => "STORAGE_ADAPTER_DESCRIPTOR",
    StorageDeviceIdDescriptor => "STORAGE_DEVICE_ID_DESCRIPTOR",
    StorageIdentifierHeader => "STORAGE_IDENTIFIER",
    StorageWriteCacheProperty => "STORAGE_WRITE_CACHE_PROPERTY",
    StorageMiniportDescriptor => "STORAGE_MINIPORT_DESCRIPTOR",
    StorageAccessAlignmentDescriptor => "STORAGE_ACCESS_ALIGNMENT_DESCRIPTOR",
    DeviceSeekPenaltyDescriptor => "DEVICE_SEEK_PENALTY_DESCRIPTOR",
    DeviceTrimDescriptor => "DEVICE_TRIM_DESCRIPTOR",
    DeviceWriteAggregationDescriptor => "DEVICE_WRITE_AGGREGATION_DESCRIPTOR",
    DevicePowerDescriptor => "DEVICE_POWER_DESCRIPTOR",
    DeviceCopyOffloadDescriptor => "DEVICE_COPY_OFFLOAD_DESCRIPTOR",
    StorageDeviceResiliencyDescriptor => "STORAGE_DEVICE_RESILIENCY_DESCRIPTOR",
    StorageDeviceNumber => "STORAGE_DEVICE_NUMBER",
    StorageReadCapacity => "STORAGE_READ_CAPACITY",
    StorageHotplugInfo => "STORAGE_HOTPLUG_INFO",
    StoragePredictFailure => "STORAGE_PREDICT_FAILURE",
    MediaSerialNumberData => "MEDIA_SERIAL_NUMBER_DATA",
    PreventMediaRemoval => "PREVENT_MEDIA_REMOVAL",
    GetMediaTypes => "GET_MEDIA_TYPES",
    DiskMediaInfo => "DEVICE_MEDIA_INFO",
    TapeMediaInfo => "DEVICE_MEDIA_INFO",
}
