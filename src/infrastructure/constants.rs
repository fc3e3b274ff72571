// Copyright 2025 Ankra.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Platform defaults
pub const DEFAULT_BASE_URL: &str = "https://platform.ankra.app";

/// Environment variables
pub const ENV_API_TOKEN: &str = "ANKRA_API_TOKEN";
pub const ENV_BASE_URL: &str = "ANKRA_BASE_URL";

/// Local files
pub const CONFIG_FILE_NAME: &str = ".ankra.yaml";
pub const STATE_DIR_NAME: &str = ".ankra";
pub const SELECTED_CLUSTER_FILE: &str = "selected.json";
pub const SELECTED_ORG_FILE: &str = "organisation.json";

/// HTTP behaviour
pub const HTTP_TIMEOUT_SECS: u64 = 60;

/// Login flow
pub const LOGIN_TIMEOUT_SECS: u64 = 300;
pub const MACHINE_ID_PART_MAX: usize = 20;

/// Pagination defaults
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 25;
