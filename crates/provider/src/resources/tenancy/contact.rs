//! `netbox_contact`

use crate::framework::{Attr, Diagnostics, Schema};
use crate::lookup::{self, targets};
use crate::resources::engine::{state_model, NetBoxResource, ObjectResource};
use crate::schema_attrs::{
    bounded_string_attribute, comments_attribute, custom_fields_attribute, description_attribute,
    id_attribute, name_attribute, reference_attribute, tags_attribute,
};
use crate::utils::request::{comments, description, string_or_empty};
use crate::utils::state::{reconcile_reference, string_from_api};
use crate::utils::CustomFieldModel;
use netbox_client::{endpoint, Contact, Endpoint, NetBoxClientTrait, WritableContactRequest};
use serde::{Deserialize, Serialize};

/// Contact state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactModel {
    pub id: Attr<String>,
    pub name: Attr<String>,
    pub group: Attr<String>,
    pub title: Attr<String>,
    pub phone: Attr<String>,
    pub email: Attr<String>,
    pub address: Attr<String>,
    pub link: Attr<String>,
    pub description: Attr<String>,
    pub comments: Attr<String>,
    pub tags: Attr<Vec<String>>,
    pub custom_fields: Attr<Vec<CustomFieldModel>>,
}

state_model!(ContactModel);

/// Contact resource definition
#[derive(Debug, Default)]
pub struct ContactSpec;

/// `netbox_contact`
pub type ContactResource = NetBoxResource<ContactSpec>;

#[async_trait::async_trait]
impl ObjectResource for ContactSpec {
    type Model = ContactModel;
    type Object = Contact;
    type Request = WritableContactRequest;

    const TYPE_SUFFIX: &'static str = "contact";
    const ENDPOINT: Endpoint = endpoint::CONTACTS;
    const LOOKUP_FIELD: Option<&'static str> = Some("name");

    fn schema(&self) -> Schema {
        Schema::new("Manages a contact in Netbox: a person or team responsible for resources.")
            .attribute("id", id_attribute("contact"))
            .attribute("name", name_attribute("contact", 100))
            .attribute(
                "group",
                reference_attribute("contact group", "ID or slug of the contact group this contact belongs to."),
            )
            .attribute("title", bounded_string_attribute("Job title or role of the contact.", 100))
            .attribute("phone", bounded_string_attribute("Phone number of the contact.", 50))
            .attribute("email", bounded_string_attribute("Email address of the contact.", 254))
            .attribute("address", bounded_string_attribute("Physical address of the contact.", 200))
            .attribute("link", bounded_string_attribute("URL associated with the contact.", 200))
            .attribute("description", description_attribute("contact"))
            .attribute("comments", comments_attribute("contact"))
            .attribute("tags", tags_attribute())
            .attribute("custom_fields", custom_fields_attribute())
    }

    async fn build_request(
        &self,
        client: &dyn NetBoxClientTrait,
        model: &ContactModel,
    ) -> Result<WritableContactRequest, Diagnostics> {
        let mut diags = Diagnostics::new();
        let group =
            lookup::resolve_optional(client, &targets::CONTACT_GROUP, &model.group, "group", &mut diags).await;
        if diags.has_error() {
            return Err(diags);
        }
        Ok(WritableContactRequest {
            name: string_or_empty(&model.name),
            group,
            title: string_or_empty(&model.title),
            phone: string_or_empty(&model.phone),
            email: string_or_empty(&model.email),
            address: string_or_empty(&model.address),
            link: string_or_empty(&model.link),
            description: description(&model.description),
            comments: comments(&model.comments),
        })
    }

    fn map_to_state(&self, contact: &Contact, model: &mut ContactModel) {
        model.name = Attr::Value(contact.name.clone());
        model.group = reconcile_reference(&model.group, contact.group.as_ref());
        model.title = string_from_api(&contact.title, &model.title);
        model.phone = string_from_api(&contact.phone, &model.phone);
        model.email = string_from_api(&contact.email, &model.email);
        model.address = string_from_api(&contact.address, &model.address);
        model.link = string_from_api(&contact.link, &model.link);
        model.description = string_from_api(&contact.description, &model.description);
        model.comments = string_from_api(&contact.comments, &model.comments);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::testing::{self, assert_contract};
    use netbox_client::MockNetBoxClient;
    use serde_json::json;

    #[test]
    fn contract() {
        assert_contract::<ContactSpec>(
            "netbox_contact",
            &["name"],
            &[
                "group", "title", "phone", "email", "address", "link", "description", "comments",
                "tags", "custom_fields",
            ],
            &["id"],
        );
    }

    #[tokio::test]
    async fn clearing_optional_strings() {
        let client = MockNetBoxClient::new("https://netbox.test");
        let contacts = testing::resource::<ContactSpec>(&client);

        let state = testing::create(
            &contacts,
            json!({"name": "Jane Doe", "email": "jane@example.com", "phone": "+33 1 23 45 67 89"}),
        )
        .await;
        assert_eq!(state["email"], "jane@example.com");
        assert_eq!(state["group"], json!(null));

        let updated = testing::update(
            &contacts,
            json!({"name": "Jane Doe", "email": "", "title": "NOC lead"}),
            state,
        )
        .await;
        assert_eq!(updated["email"], "");
        assert_eq!(updated["phone"], json!(null));
        assert_eq!(updated["title"], "NOC lead");
        assert_eq!(client.get_object(&endpoint::CONTACTS, 1).unwrap()["phone"], "");
    }
}
