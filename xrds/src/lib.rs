/*
Copyright 2024 OpenXRDS

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

     https://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/
#[cfg(feature = "core")]
pub use xrds_core as base;

#[cfg(feature = "component")]
pub use xrds_components as components;

#[cfg(feature = "runtime")]
pub use xrds_runtime::{
    Runtime, RuntimeBuilder, RuntimeError, RuntimeHandler, RuntimeParameters, SharedComponent,
    World,
};

pub mod prelude {
    #[cfg(feature = "component")]
    pub use xrds_components::{AnchorHandle, ExponentialSmoothing, HandledObject, Smoothing};
    #[cfg(feature = "core")]
    pub use xrds_core::{
        read_lock, share_handle, write_lock, Handle, HandleError, Pose, SharedHandle, Transform,
        XrdsComponent, XrdsObject,
    };
    #[cfg(feature = "runtime")]
    pub use xrds_runtime::{Runtime, RuntimeHandler, World};
}
