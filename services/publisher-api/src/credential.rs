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

use std::fmt::{Debug, Formatter};

use crate::Config;
use yudu_publisher_core::utils::Redact;
use yudu_publisher_core::Error;

/// Credential for the publisher api.
#[derive(Clone)]
pub struct Credential {
    /// Api key, sent in the `Authentication` header.
    pub key: String,
    /// Api secret, used as the HMAC key and never sent.
    pub secret: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(key: &str, secret: &str) -> Self {
        Self {
            key: key.to_string(),
            secret: secret.to_string(),
        }
    }

    /// Check if both halves of the credential are present.
    pub fn is_valid(&self) -> bool {
        !self.key.is_empty() && !self.secret.is_empty()
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("key", &Redact::from(&self.key))
            .field("secret", &Redact::from(&self.secret))
            .finish()
    }
}

impl TryFrom<&Config> for Credential {
    type Error = Error;

    fn try_from(config: &Config) -> Result<Self, Self::Error> {
        let (Some(key), Some(secret)) = (&config.key, &config.secret) else {
            return Err(Error::config_invalid(
                "publisher key and secret must both be configured",
            ));
        };

        let cred = Credential::new(key, secret);
        if !cred.is_valid() {
            return Err(Error::config_invalid(
                "publisher key and secret must not be empty",
            ));
        }
        Ok(cred)
    }
}
