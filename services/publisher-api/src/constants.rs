// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

// Env values used by the publisher client.
pub const YUDU_PUBLISHER_KEY: &str = "YUDU_PUBLISHER_KEY";
pub const YUDU_PUBLISHER_SECRET: &str = "YUDU_PUBLISHER_SECRET";
pub const YUDU_PUBLISHER_VERSION: &str = "YUDU_PUBLISHER_VERSION";
pub const YUDU_PUBLISHER_SERVICE_URL: &str = "YUDU_PUBLISHER_SERVICE_URL";

// Service defaults.
pub const DEFAULT_SERVICE_URL: &str = "https://api.yudu.com/Yudu/services";
pub const DEFAULT_VERSION: &str = "2.1";

/// Path prefix that precedes `{version}/{resource}` in the string to sign.
///
/// The server verifies against this literal, whatever `service_url` is.
pub const SIGNING_PATH_PREFIX: &str = "/Yudu/services/";

// Headers.
pub const AUTHENTICATION: &str = "authentication";
pub const SIGNATURE: &str = "signature";
pub const CONTENT_TYPE_XML: &str = "application/vnd.yudu+xml";

// Query parameters.
pub const TIMESTAMP: &str = "timestamp";

pub const XML_NAMESPACE: &str = "http://schema.yudu.com";
