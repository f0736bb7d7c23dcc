use super::{KnownAction, KnownController, KnownParam};
use crate::ir::{ActionCategory, RiskLevel};

pub(super) static KNOWN_CONTROLLERS: &[KnownController] = &[
    KnownController {
        name: "RecordUiController",
        description: "Record UI operations - view, create, update records",
        category: ActionCategory::Record,
        risk: RiskLevel::Medium,
        actions: &[
            KnownAction {
                name: "getRecordWithFields",
                params: &[
                    KnownParam {
                        name: "recordId",
                        ty: "Id",
                        required: true,
                        description: "Salesforce record ID",
                    },
                    KnownParam {
                        name: "fields",
                        ty: "List<String>",
                        required: true,
                        description: "Fields to retrieve",
                    },
                ],
                return_type: "RecordUiResponse",
                risk: RiskLevel::Medium,
                description: "Get record data with specified fields",
                requires_auth: false,
                weaknesses: &[
                    "IDOR: record ids are enumerable and sharing rules are the only guard",
                    "Field-level security is not enforced for guest profiles with broad object access",
                ],
            },
            KnownAction {
                name: "getRecordCreateDefaults",
                params: &[
                    KnownParam {
                        name: "objectApiName",
                        ty: "String",
                        required: true,
                        description: "Object API name",
                    },
                    KnownParam {
                        name: "recordTypeId",
                        ty: "Id",
                        required: false,
                        description: "Record type ID",
                    },
                ],
                return_type: "RecordDefaults",
                risk: RiskLevel::Low,
                description: "Get default values for new record creation",
                requires_auth: false,
                weaknesses: &[
                    "Discloses object schema and default field values",
                ],
            },
            KnownAction {
                name: "getRecordUi",
                params: &[
                    KnownParam {
                        name: "recordIds",
                        ty: "List<Id>",
                        required: true,
                        description: "List of record IDs",
                    },
                    KnownParam {
                        name: "layoutTypes",
                        ty: "List<String>",
                        required: false,
                        description: "Layout types to retrieve",
                    },
                    KnownParam {
                        name: "modes",
                        ty: "List<String>",
                        required: false,
                        description: "View/Edit modes",
                    },
                ],
                return_type: "RecordUiResponse",
                risk: RiskLevel::Medium,
                description: "Get full record UI data including layouts",
                requires_auth: false,
                weaknesses: &[
                    "IDOR: bulk record retrieval by id list",
                    "Layout metadata reveals hidden fields",
                ],
            },
            KnownAction {
                name: "getObjectInfo",
                params: &[
                    KnownParam {
                        name: "objectApiName",
                        ty: "String",
                        required: true,
                        description: "Object API name",
                    },
                ],
                return_type: "ObjectInfo",
                risk: RiskLevel::Low,
                description: "Get object metadata and field definitions",
                requires_auth: false,
                weaknesses: &[
                    "Schema disclosure usable for object enumeration",
                ],
            },
            KnownAction {
                name: "updateRecord",
                params: &[
                    KnownParam {
                        name: "recordId",
                        ty: "Id",
                        required: true,
                        description: "Record to update",
                    },
                    KnownParam {
                        name: "fields",
                        ty: "Map<String, Object>",
                        required: true,
                        description: "Field values to update",
                    },
                ],
                return_type: "RecordUiResponse",
                risk: RiskLevel::High,
                description: "Update record fields",
                requires_auth: true,
                weaknesses: &[
                    "Mass assignment of fields not shown in the UI",
                    "Guest users with edit access can tamper with records",
                ],
            },
            KnownAction {
                name: "createRecord",
                params: &[
                    KnownParam {
                        name: "objectApiName",
                        ty: "String",
                        required: true,
                        description: "Object API name",
                    },
                    KnownParam {
                        name: "fields",
                        ty: "Map<String, Object>",
                        required: true,
                        description: "Field values",
                    },
                ],
                return_type: "RecordUiResponse",
                risk: RiskLevel::High,
                description: "Create new record",
                requires_auth: true,
                weaknesses: &[
                    "Record creation as guest user on misconfigured objects",
                    "Mass assignment of privileged fields such as OwnerId",
                ],
            },
            KnownAction {
                name: "deleteRecord",
                params: &[
                    KnownParam {
                        name: "recordId",
                        ty: "Id",
                        required: true,
                        description: "Record to delete",
                    },
                ],
                return_type: "Boolean",
                risk: RiskLevel::Critical,
                description: "Delete a record",
                requires_auth: true,
                weaknesses: &[
                    "Unauthorized record deletion when sharing grants edit access",
                    "IDOR on record id",
                ],
            },
        ],
    },
    KnownController {
        name: "ApexActionController",
        description: "Execute custom Apex methods marked with @AuraEnabled",
        category: ActionCategory::Apex,
        risk: RiskLevel::Critical,
        actions: &[
            KnownAction {
                name: "execute",
                params: &[
                    KnownParam {
                        name: "namespace",
                        ty: "String",
                        required: false,
                        description: "Apex namespace",
                    },
                    KnownParam {
                        name: "classname",
                        ty: "String",
                        required: true,
                        description: "Apex class name",
                    },
                    KnownParam {
                        name: "method",
                        ty: "String",
                        required: true,
                        description: "Method name",
                    },
                    KnownParam {
                        name: "params",
                        ty: "Map<String, Object>",
                        required: false,
                        description: "Method parameters",
                    },
                    KnownParam {
                        name: "cacheable",
                        ty: "Boolean",
                        required: false,
                        description: "Cache response",
                    },
                ],
                return_type: "Object",
                risk: RiskLevel::Critical,
                description: "Execute @AuraEnabled Apex method",
                requires_auth: true,
                weaknesses: &[
                    "Reaches any @AuraEnabled method exposed to the guest profile",
                    "Apex runs in system mode unless the class declares with sharing",
                    "Dynamic SOQL inside exposed methods is injectable",
                ],
            },
        ],
    },
    KnownController {
        name: "ListUiController",
        description: "List view operations",
        category: ActionCategory::Ui,
        risk: RiskLevel::Medium,
        actions: &[
            KnownAction {
                name: "getListUi",
                params: &[
                    KnownParam {
                        name: "objectApiName",
                        ty: "String",
                        required: true,
                        description: "Object API name",
                    },
                    KnownParam {
                        name: "listViewApiName",
                        ty: "String",
                        required: false,
                        description: "List view name",
                    },
                    KnownParam {
                        name: "pageSize",
                        ty: "Integer",
                        required: false,
                        description: "Records per page",
                    },
                    KnownParam {
                        name: "pageToken",
                        ty: "String",
                        required: false,
                        description: "Pagination token",
                    },
                ],
                return_type: "ListUiResponse",
                risk: RiskLevel::Medium,
                description: "Get list view UI data",
                requires_auth: false,
                weaknesses: &[
                    "Bulk data exposure through list views visible to guests",
                    "Pagination allows full object dumps",
                ],
            },
            KnownAction {
                name: "getListsByObjectName",
                params: &[
                    KnownParam {
                        name: "objectApiName",
                        ty: "String",
                        required: true,
                        description: "Object API name",
                    },
                ],
                return_type: "List<ListView>",
                risk: RiskLevel::Low,
                description: "Get available list views for object",
                requires_auth: false,
                weaknesses: &[
                    "Enumerates list views, including ones left shared to all users",
                ],
            },
        ],
    },
    KnownController {
        name: "LookupController",
        description: "Lookup field search operations",
        category: ActionCategory::Ui,
        risk: RiskLevel::Medium,
        actions: &[
            KnownAction {
                name: "getRecordTypeInfos",
                params: &[
                    KnownParam {
                        name: "objectApiName",
                        ty: "String",
                        required: true,
                        description: "Object API name",
                    },
                ],
                return_type: "List<RecordTypeInfo>",
                risk: RiskLevel::Low,
                description: "Get record types for object",
                requires_auth: false,
                weaknesses: &[],
            },
            KnownAction {
                name: "search",
                params: &[
                    KnownParam {
                        name: "searchTerm",
                        ty: "String",
                        required: true,
                        description: "Search query",
                    },
                    KnownParam {
                        name: "objectApiName",
                        ty: "String",
                        required: true,
                        description: "Object to search",
                    },
                    KnownParam {
                        name: "fieldApiName",
                        ty: "String",
                        required: false,
                        description: "Field to search",
                    },
                    KnownParam {
                        name: "maxResults",
                        ty: "Integer",
                        required: false,
                        description: "Max results",
                    },
                ],
                return_type: "List<LookupResult>",
                risk: RiskLevel::Medium,
                description: "Search for lookup values",
                requires_auth: false,
                weaknesses: &[
                    "Record enumeration via wildcard search terms",
                ],
            },
        ],
    },
    KnownController {
        name: "ActionsController",
        description: "Quick actions and global actions",
        category: ActionCategory::Ui,
        risk: RiskLevel::High,
        actions: &[
            KnownAction {
                name: "getActions",
                params: &[
                    KnownParam {
                        name: "recordId",
                        ty: "Id",
                        required: false,
                        description: "Record ID for context",
                    },
                    KnownParam {
                        name: "objectApiName",
                        ty: "String",
                        required: false,
                        description: "Object API name",
                    },
                ],
                return_type: "List<Action>",
                risk: RiskLevel::Low,
                description: "Get available actions",
                requires_auth: false,
                weaknesses: &[
                    "Discloses quick actions available to the current profile",
                ],
            },
            KnownAction {
                name: "invokeAction",
                params: &[
                    KnownParam {
                        name: "actionApiName",
                        ty: "String",
                        required: true,
                        description: "Action to invoke",
                    },
                    KnownParam {
                        name: "recordId",
                        ty: "Id",
                        required: false,
                        description: "Record context",
                    },
                    KnownParam {
                        name: "params",
                        ty: "Map<String, Object>",
                        required: false,
                        description: "Action params",
                    },
                ],
                return_type: "ActionResult",
                risk: RiskLevel::High,
                description: "Invoke a quick action",
                requires_auth: true,
                weaknesses: &[
                    "Invokes flows or Apex behind quick actions without UI checks",
                ],
            },
        ],
    },
    KnownController {
        name: "NavigationController",
        description: "Navigation and URL generation",
        category: ActionCategory::System,
        risk: RiskLevel::Low,
        actions: &[
            KnownAction {
                name: "generateUrl",
                params: &[
                    KnownParam {
                        name: "pageReference",
                        ty: "PageReference",
                        required: true,
                        description: "Page reference object",
                    },
                ],
                return_type: "String",
                risk: RiskLevel::Low,
                description: "Generate URL from page reference",
                requires_auth: false,
                weaknesses: &[],
            },
        ],
    },
    KnownController {
        name: "CommunityNavigationController",
        description: "Experience Cloud navigation",
        category: ActionCategory::Community,
        risk: RiskLevel::Low,
        actions: &[
            KnownAction {
                name: "getNavigationMenuItems",
                params: &[
                    KnownParam {
                        name: "menuName",
                        ty: "String",
                        required: true,
                        description: "Navigation menu name",
                    },
                    KnownParam {
                        name: "publishedState",
                        ty: "String",
                        required: false,
                        description: "Published state filter",
                    },
                ],
                return_type: "List<NavigationMenuItem>",
                risk: RiskLevel::Low,
                description: "Get navigation menu items",
                requires_auth: false,
                weaknesses: &[
                    "Draft menu items disclose unpublished pages",
                ],
            },
        ],
    },
    KnownController {
        name: "CommunityLoginController",
        description: "Community/Experience Cloud login",
        category: ActionCategory::Auth,
        risk: RiskLevel::High,
        actions: &[
            KnownAction {
                name: "login",
                params: &[
                    KnownParam {
                        name: "username",
                        ty: "String",
                        required: true,
                        description: "Username",
                    },
                    KnownParam {
                        name: "password",
                        ty: "String",
                        required: true,
                        description: "Password",
                    },
                    KnownParam {
                        name: "startUrl",
                        ty: "String",
                        required: false,
                        description: "Redirect URL after login",
                    },
                ],
                return_type: "LoginResult",
                risk: RiskLevel::Critical,
                description: "Authenticate user",
                requires_auth: false,
                weaknesses: &[
                    "Credential stuffing without lockout on the Aura endpoint",
                    "Open redirect through startUrl",
                ],
            },
            KnownAction {
                name: "getSelfRegisterUrl",
                params: &[],
                return_type: "String",
                risk: RiskLevel::Low,
                description: "Get self-registration URL",
                requires_auth: false,
                weaknesses: &[
                    "Reveals whether self-registration is enabled",
                ],
            },
            KnownAction {
                name: "getForgotPasswordUrl",
                params: &[],
                return_type: "String",
                risk: RiskLevel::Low,
                description: "Get forgot password URL",
                requires_auth: false,
                weaknesses: &[],
            },
        ],
    },
    KnownController {
        name: "WireAdapter",
        description: "Wire service data adapter",
        category: ActionCategory::Data,
        risk: RiskLevel::High,
        actions: &[
            KnownAction {
                name: "query",
                params: &[
                    KnownParam {
                        name: "query",
                        ty: "String",
                        required: true,
                        description: "SOQL query string",
                    },
                ],
                return_type: "QueryResult",
                risk: RiskLevel::Critical,
                description: "Execute SOQL query",
                requires_auth: true,
                weaknesses: &[
                    "Arbitrary SOQL as the running user",
                    "Reads objects the UI never exposes",
                ],
            },
        ],
    },
    KnownController {
        name: "CartController",
        description: "B2B/B2C Commerce cart operations",
        category: ActionCategory::Commerce,
        risk: RiskLevel::High,
        actions: &[
            KnownAction {
                name: "getCart",
                params: &[
                    KnownParam {
                        name: "cartId",
                        ty: "Id",
                        required: false,
                        description: "Cart ID",
                    },
                    KnownParam {
                        name: "effectiveAccountId",
                        ty: "Id",
                        required: false,
                        description: "Account context",
                    },
                ],
                return_type: "Cart",
                risk: RiskLevel::Medium,
                description: "Get cart details",
                requires_auth: false,
                weaknesses: &[
                    "IDOR on cartId and effectiveAccountId",
                ],
            },
            KnownAction {
                name: "addToCart",
                params: &[
                    KnownParam {
                        name: "productId",
                        ty: "Id",
                        required: true,
                        description: "Product to add",
                    },
                    KnownParam {
                        name: "quantity",
                        ty: "Integer",
                        required: true,
                        description: "Quantity",
                    },
                    KnownParam {
                        name: "cartId",
                        ty: "Id",
                        required: false,
                        description: "Cart ID",
                    },
                ],
                return_type: "CartItem",
                risk: RiskLevel::Medium,
                description: "Add item to cart",
                requires_auth: false,
                weaknesses: &[
                    "Negative or zero quantities accepted by custom cart logic",
                ],
            },
            KnownAction {
                name: "updateCartItem",
                params: &[
                    KnownParam {
                        name: "cartItemId",
                        ty: "Id",
                        required: true,
                        description: "Cart item ID",
                    },
                    KnownParam {
                        name: "quantity",
                        ty: "Integer",
                        required: true,
                        description: "New quantity",
                    },
                ],
                return_type: "CartItem",
                risk: RiskLevel::Medium,
                description: "Update cart item quantity",
                requires_auth: false,
                weaknesses: &[
                    "IDOR on cartItemId",
                ],
            },
            KnownAction {
                name: "deleteCartItem",
                params: &[
                    KnownParam {
                        name: "cartItemId",
                        ty: "Id",
                        required: true,
                        description: "Cart item to remove",
                    },
                ],
                return_type: "Boolean",
                risk: RiskLevel::Medium,
                description: "Remove item from cart",
                requires_auth: false,
                weaknesses: &[
                    "IDOR on cartItemId",
                ],
            },
            KnownAction {
                name: "checkout",
                params: &[
                    KnownParam {
                        name: "cartId",
                        ty: "Id",
                        required: true,
                        description: "Cart to checkout",
                    },
                ],
                return_type: "CheckoutResult",
                risk: RiskLevel::High,
                description: "Initiate checkout process",
                requires_auth: true,
                weaknesses: &[
                    "Checkout of another account's cart",
                    "Price tampering through stale cart state",
                ],
            },
        ],
    },
    KnownController {
        name: "ProductController",
        description: "Commerce product operations",
        category: ActionCategory::Commerce,
        risk: RiskLevel::Medium,
        actions: &[
            KnownAction {
                name: "getProduct",
                params: &[
                    KnownParam {
                        name: "productId",
                        ty: "Id",
                        required: true,
                        description: "Product ID",
                    },
                ],
                return_type: "Product",
                risk: RiskLevel::Low,
                description: "Get product details",
                requires_auth: false,
                weaknesses: &[
                    "Unpublished products readable by id",
                ],
            },
            KnownAction {
                name: "searchProducts",
                params: &[
                    KnownParam {
                        name: "searchTerm",
                        ty: "String",
                        required: true,
                        description: "Search query",
                    },
                    KnownParam {
                        name: "categoryId",
                        ty: "Id",
                        required: false,
                        description: "Category filter",
                    },
                    KnownParam {
                        name: "pageSize",
                        ty: "Integer",
                        required: false,
                        description: "Results per page",
                    },
                ],
                return_type: "ProductSearchResult",
                risk: RiskLevel::Low,
                description: "Search products",
                requires_auth: false,
                weaknesses: &[],
            },
        ],
    },
    KnownController {
        name: "ChatterController",
        description: "Chatter feed operations",
        category: ActionCategory::Ui,
        risk: RiskLevel::Medium,
        actions: &[
            KnownAction {
                name: "getFeed",
                params: &[
                    KnownParam {
                        name: "feedType",
                        ty: "String",
                        required: true,
                        description: "Feed type (News, Record, etc.)",
                    },
                    KnownParam {
                        name: "subjectId",
                        ty: "Id",
                        required: false,
                        description: "Subject record ID",
                    },
                ],
                return_type: "ChatterFeed",
                risk: RiskLevel::Medium,
                description: "Get Chatter feed",
                requires_auth: false,
                weaknesses: &[
                    "Internal discussion exposed through record feeds",
                ],
            },
            KnownAction {
                name: "postFeedElement",
                params: &[
                    KnownParam {
                        name: "subjectId",
                        ty: "Id",
                        required: true,
                        description: "Feed subject",
                    },
                    KnownParam {
                        name: "text",
                        ty: "String",
                        required: true,
                        description: "Post content",
                    },
                ],
                return_type: "FeedElement",
                risk: RiskLevel::High,
                description: "Create feed post",
                requires_auth: true,
                weaknesses: &[
                    "Stored content injection into internal feeds",
                ],
            },
        ],
    },
    KnownController {
        name: "ContentController",
        description: "Content document operations",
        category: ActionCategory::Data,
        risk: RiskLevel::High,
        actions: &[
            KnownAction {
                name: "getContentDocumentLink",
                params: &[
                    KnownParam {
                        name: "contentDocumentId",
                        ty: "Id",
                        required: true,
                        description: "Document ID",
                    },
                ],
                return_type: "ContentDocumentLink",
                risk: RiskLevel::Medium,
                description: "Get document link",
                requires_auth: false,
                weaknesses: &[
                    "IDOR on ContentDocument ids",
                    "Public links leak private files",
                ],
            },
            KnownAction {
                name: "uploadFile",
                params: &[
                    KnownParam {
                        name: "base64Data",
                        ty: "String",
                        required: true,
                        description: "File content (base64)",
                    },
                    KnownParam {
                        name: "fileName",
                        ty: "String",
                        required: true,
                        description: "File name",
                    },
                    KnownParam {
                        name: "recordId",
                        ty: "Id",
                        required: false,
                        description: "Parent record",
                    },
                ],
                return_type: "ContentVersion",
                risk: RiskLevel::High,
                description: "Upload file attachment",
                requires_auth: true,
                weaknesses: &[
                    "Unrestricted file upload as guest user",
                    "Attaching files to records the caller cannot see",
                ],
            },
            KnownAction {
                name: "deleteFile",
                params: &[
                    KnownParam {
                        name: "contentDocumentId",
                        ty: "Id",
                        required: true,
                        description: "Document to delete",
                    },
                ],
                return_type: "Boolean",
                risk: RiskLevel::Critical,
                description: "Delete content document",
                requires_auth: true,
                weaknesses: &[
                    "Unauthorized document deletion",
                ],
            },
        ],
    },
];
