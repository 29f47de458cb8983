// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use once_cell::unsync::OnceCell;
use tracing::debug;

use crate::{
    control_code::storage::QUERY_PROPERTY,
    device::{Device, DeviceBackend},
    error::Result,
    models::storage::{
        DeviceCopyOffloadDescriptor, DevicePowerDescriptor, DeviceSeekPenaltyDescriptor,
        DeviceTrimDescriptor, DeviceWriteAggregationDescriptor, StorageAccessAlignmentDescriptor,
        StorageAdapterDescriptor, StorageDeviceDescriptor, StorageDeviceIdDescriptor,
        StorageDeviceResiliencyDescriptor, StorageMiniportDescriptor, StorageProperty,
        StoragePropertyQuery, StorageQueryType, StorageWriteCacheProperty,
    },
};

/// Query one property descriptor.
///
/// The property is first probed with an exists query; only a positive probe
/// is followed by the standard query. A failed query or a descriptor with a
/// zero size is `None`, even after a positive probe.
pub fn query_property<B: DeviceBackend, P: StorageProperty>(
    device: &Device<B>,
) -> Result<Option<P>> {
    let exists = StoragePropertyQuery::new(P::PROPERTY_ID, StorageQueryType::Exists);
    if !device.control_with(QUERY_PROPERTY, &exists)?.success {
        debug!(path = device.path(), property = ?P::PROPERTY_ID, "property not present");
        return Ok(None);
    }

    let standard = StoragePropertyQuery::new(P::PROPERTY_ID, StorageQueryType::Standard);
    let rsp = device.send::<_, P>(QUERY_PROPERTY, Some(&standard))?;
    if !rsp.success || rsp.output.descriptor_size() == 0 {
        debug!(
            path = device.path(),
            property = ?P::PROPERTY_ID,
            error = rsp.error,
            "property probe passed but query returned nothing"
        );
        return Ok(None);
    }
    Ok(Some(rsp.output))
}

macro_rules! cached_properties {
    ($($(#[$meta:meta])* $getter:ident: $ty:ty,)*) => {
        /// Cached storage property descriptors of one device.
        #[derive(Debug)]
        pub struct Properties<'d, B: DeviceBackend> {
            dev: &'d Device<B>,
            $($getter: OnceCell<Option<$ty>>,)*
        }

        impl<'d, B: DeviceBackend> Properties<'d, B> {
            pub fn new(device: &'d Device<B>) -> Self {
                Self {
                    dev: device,
                    $($getter: OnceCell::new(),)*
                }
            }

            $(
                $(#[$meta])*
                pub fn $getter(&self) -> Result<Option<&$ty>> {
                    let v = self
                        .$getter
                        .get_or_try_init(|| query_property::<B, $ty>(self.dev))?;
                    Ok(v.as_ref())
                }
            )*
        }
    };
}

cached_properties! {
    /// Vendor, product and bus of the device.
    device: StorageDeviceDescriptor,
    adapter: StorageAdapterDescriptor,
    id: StorageDeviceIdDescriptor,
    write_cache: StorageWriteCacheProperty,
    miniport: StorageMiniportDescriptor,
    access_alignment: StorageAccessAlignmentDescriptor,
    /// `false` for solid-state media.
    seek_penalty: DeviceSeekPenaltyDescriptor,
    trim: DeviceTrimDescriptor,
    write_aggregation: DeviceWriteAggregationDescriptor,
    power: DevicePowerDescriptor,
    copy_offload: DeviceCopyOffloadDescriptor,
    resiliency: StorageDeviceResiliencyDescriptor,
}
