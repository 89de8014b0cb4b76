use log::debug;
use yudu_publisher_core::{Context, Result};

use crate::{
    Config, Credential, Fields, Method, RequestBuilder, RequestSigner, ResponseView,
    TargetedNotification, XmlDocument,
};

/// Publisher is the client for every YUDU Publisher endpoint.
///
/// Each method builds one [`RequestBuilder`], signs it and sends it through
/// the [`Context`]. Responses come back as [`ResponseView`] whatever their
/// status.
#[derive(Clone, Debug)]
pub struct Publisher {
    ctx: Context,
    signer: RequestSigner,
    cred: Credential,
}

impl Publisher {
    /// Create a publisher client.
    ///
    /// Fails with `ConfigInvalid` if the config carries no key or secret.
    pub fn new(ctx: Context, config: &Config) -> Result<Self> {
        let cred = Credential::try_from(config)?;
        let signer = RequestSigner::from_config(config);
        debug!(
            "publisher client for api version {} at {}",
            config.version(),
            config.service_url()
        );

        Ok(Self { ctx, signer, cred })
    }

    /// Send an arbitrary request, for endpoints without a dedicated method.
    pub async fn send(&self, req: RequestBuilder) -> Result<ResponseView> {
        req.send(&self.ctx, &self.signer, &self.cred).await
    }

    async fn get(&self, resource: String, query: &[(&str, &str)]) -> Result<ResponseView> {
        self.send(
            RequestBuilder::new()
                .method(Method::Get)
                .resource(resource)
                .query(query.iter().copied()),
        )
        .await
    }

    async fn delete(&self, resource: String, query: &[(&str, &str)]) -> Result<ResponseView> {
        self.send(
            RequestBuilder::new()
                .method(Method::Delete)
                .resource(resource)
                .query(query.iter().copied()),
        )
        .await
    }

    async fn write(
        &self,
        method: Method,
        resource: String,
        query: &[(&str, &str)],
        doc: &XmlDocument,
    ) -> Result<ResponseView> {
        self.send(
            RequestBuilder::new()
                .method(method)
                .resource(resource)
                .query(query.iter().copied())
                .body(doc.to_xml()?),
        )
        .await
    }

    /// List links to the other available resources.
    pub async fn links(&self) -> Result<ResponseView> {
        self.get(String::new(), &[]).await
    }

    /// List readers.
    pub async fn readers(&self, query: &[(&str, &str)]) -> Result<ResponseView> {
        self.get("readers".to_string(), query).await
    }

    /// Get a reader.
    pub async fn reader(&self, id: &str) -> Result<ResponseView> {
        self.get(format!("readers/{id}"), &[]).await
    }

    /// Create a reader.
    pub async fn create_reader(&self, fields: Fields) -> Result<ResponseView> {
        let doc = XmlDocument::CreateReader(fields);
        self.write(Method::Post, "readers".to_string(), &[], &doc)
            .await
    }

    /// Update a reader.
    pub async fn update_reader(&self, id: &str, fields: Fields) -> Result<ResponseView> {
        let doc = XmlDocument::UpdateReader {
            id: id.to_string(),
            fields,
        };
        self.write(Method::Put, format!("readers/{id}"), &[], &doc)
            .await
    }

    /// Delete a reader.
    pub async fn delete_reader(&self, id: &str) -> Result<ResponseView> {
        self.delete(format!("readers/{id}"), &[]).await
    }

    /// Remove all authorised devices of a reader.
    pub async fn remove_devices(&self, id: &str) -> Result<ResponseView> {
        self.delete(format!("readers/{id}/authorisedDevices"), &[])
            .await
    }

    /// Check a reader's password.
    pub async fn authenticate_password(&self, id: &str, password: &str) -> Result<ResponseView> {
        let doc = XmlDocument::AuthenticatePassword {
            password: password.to_string(),
        };
        self.write(Method::Put, format!("readers/{id}/authentication"), &[], &doc)
            .await
    }

    /// List editions.
    pub async fn editions(&self, query: &[(&str, &str)]) -> Result<ResponseView> {
        self.get("editions".to_string(), query).await
    }

    /// Get an edition.
    pub async fn edition(&self, id: &str) -> Result<ResponseView> {
        self.get(format!("editions/{id}"), &[]).await
    }

    /// List edition permissions.
    pub async fn permissions(&self, query: &[(&str, &str)]) -> Result<ResponseView> {
        self.get("permissions".to_string(), query).await
    }

    /// Get a permission.
    pub async fn permission(&self, id: &str) -> Result<ResponseView> {
        self.get(format!("permissions/{id}"), &[]).await
    }

    /// Grant a reader access to an edition.
    pub async fn create_permission(&self, fields: Fields) -> Result<ResponseView> {
        let doc = XmlDocument::CreatePermission(fields);
        self.write(Method::Post, "permissions".to_string(), &[], &doc)
            .await
    }

    /// Update a permission.
    pub async fn update_permission(&self, id: &str, fields: Fields) -> Result<ResponseView> {
        let doc = XmlDocument::UpdatePermission {
            id: id.to_string(),
            fields,
        };
        self.write(Method::Put, format!("permissions/{id}"), &[], &doc)
            .await
    }

    /// Delete a permission.
    pub async fn delete_permission(&self, id: &str) -> Result<ResponseView> {
        self.delete(format!("permissions/{id}"), &[]).await
    }

    /// List reader logins.
    pub async fn reader_logins(&self, query: &[(&str, &str)]) -> Result<ResponseView> {
        self.get("readerLogins".to_string(), query).await
    }

    /// Get a reader login.
    pub async fn reader_login(&self, id: &str) -> Result<ResponseView> {
        self.get(format!("readerLogins/{id}"), &[]).await
    }

    /// List publications.
    pub async fn publications(&self, query: &[(&str, &str)]) -> Result<ResponseView> {
        self.get("publications".to_string(), query).await
    }

    /// Get a publication.
    pub async fn publication(&self, id: &str) -> Result<ResponseView> {
        self.get(format!("publications/{id}"), &[]).await
    }

    /// List subscriptions.
    pub async fn subscriptions(&self, query: &[(&str, &str)]) -> Result<ResponseView> {
        self.get("subscriptions".to_string(), query).await
    }

    /// Get a subscription.
    pub async fn subscription(&self, id: &str) -> Result<ResponseView> {
        self.get(format!("subscriptions/{id}"), &[]).await
    }

    /// List subscription periods.
    pub async fn subscription_periods(&self, query: &[(&str, &str)]) -> Result<ResponseView> {
        self.get("subscriptionPeriods".to_string(), query).await
    }

    /// Get a subscription period.
    pub async fn subscription_period(&self, id: &str) -> Result<ResponseView> {
        self.get(format!("subscriptionPeriods/{id}"), &[]).await
    }

    /// Create a subscription period.
    ///
    /// Reads `reader`, `subscription`, `startDate` and optionally `expiryDate`.
    pub async fn create_subscription_period(&self, fields: Fields) -> Result<ResponseView> {
        let doc = XmlDocument::CreateSubscriptionPeriod(fields);
        self.write(Method::Post, "subscriptionPeriods".to_string(), &[], &doc)
            .await
    }

    /// Update a subscription period.
    pub async fn update_subscription_period(
        &self,
        id: &str,
        fields: Fields,
    ) -> Result<ResponseView> {
        let doc = XmlDocument::UpdateSubscriptionPeriod {
            id: id.to_string(),
            fields,
        };
        self.write(Method::Put, format!("subscriptionPeriods/{id}"), &[], &doc)
            .await
    }

    /// Delete a subscription period.
    pub async fn delete_subscription_period(&self, id: &str) -> Result<ResponseView> {
        self.delete(format!("subscriptionPeriods/{id}"), &[])
            .await
    }

    /// Create a login token for the given key.
    pub async fn create_token(&self, key: &str) -> Result<ResponseView> {
        let doc = XmlDocument::CreateToken {
            key: key.to_string(),
        };
        self.write(Method::Post, "token".to_string(), &[], &doc)
            .await
    }

    /// Create a login token scoped to a publication.
    pub async fn create_publication_token(&self, key: &str, id: &str) -> Result<ResponseView> {
        let doc = XmlDocument::CreateToken {
            key: key.to_string(),
        };
        self.write(Method::Post, format!("publications/{id}/token"), &[], &doc)
            .await
    }

    /// Create a login token scoped to an edition.
    pub async fn create_edition_token(&self, key: &str, id: &str) -> Result<ResponseView> {
        let doc = XmlDocument::CreateToken {
            key: key.to_string(),
        };
        self.write(Method::Post, format!("editions/{id}/token"), &[], &doc)
            .await
    }

    /// Push a notification to the given subscribers.
    pub async fn send_targeted_notification(
        &self,
        notification: TargetedNotification,
    ) -> Result<ResponseView> {
        let doc = XmlDocument::TargetedNotification(notification);
        self.write(Method::Post, "targetedNotifications".to_string(), &[], &doc)
            .await
    }

    /// List categories.
    pub async fn categories(&self, query: &[(&str, &str)]) -> Result<ResponseView> {
        self.get("categories".to_string(), query).await
    }

    /// Get a category by code.
    pub async fn category(&self, code: &str) -> Result<ResponseView> {
        self.get(format!("categories/{code}"), &[]).await
    }

    /// Create a category.
    pub async fn create_category(&self, fields: Fields) -> Result<ResponseView> {
        let doc = XmlDocument::Category(fields);
        self.write(Method::Post, "categories".to_string(), &[], &doc)
            .await
    }

    /// Update the category `code` of a publication.
    pub async fn update_category(
        &self,
        code: &str,
        publication_node_id: &str,
        fields: Fields,
    ) -> Result<ResponseView> {
        let doc = XmlDocument::Category(fields);
        self.write(
            Method::Put,
            format!("categories/{code}"),
            &[("publicationNodeId", publication_node_id)],
            &doc,
        )
        .await
    }

    /// Delete the category `code` of a publication.
    pub async fn delete_category(
        &self,
        code: &str,
        publication_node_id: &str,
    ) -> Result<ResponseView> {
        self.delete(
            format!("categories/{code}"),
            &[("publicationNodeId", publication_node_id)],
        )
        .await
    }

    /// Delete every category of a publication.
    pub async fn delete_categories(&self, publication_node_id: &str) -> Result<ResponseView> {
        self.delete(
            "categories".to_string(),
            &[("publicationNodeId", publication_node_id)],
        )
        .await
    }

    /// List category editions.
    pub async fn category_editions(&self, query: &[(&str, &str)]) -> Result<ResponseView> {
        self.get("categoryEditions".to_string(), query).await
    }

    /// Add an edition to a category.
    pub async fn create_category_edition(&self, fields: Fields) -> Result<ResponseView> {
        let doc = XmlDocument::CategoryEdition(fields);
        self.write(Method::Post, "categoryEditions".to_string(), &[], &doc)
            .await
    }

    /// Remove editions from a category, selected by query.
    pub async fn delete_category_edition(&self, query: &[(&str, &str)]) -> Result<ResponseView> {
        self.delete("categoryEditions".to_string(), query).await
    }

    /// Look up the id of a third party subscriber.
    pub async fn third_party_subscriber(&self, fields: Fields) -> Result<ResponseView> {
        let doc = XmlDocument::ThirdPartySubscriber(fields);
        self.write(Method::Post, "thirdPartySubscribers".to_string(), &[], &doc)
            .await
    }
}
