#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use common_utils::errors::CustomResult;
use domain_types::{
    errors::{ApiClientError, DownloadError, LocationError},
    form::{FormField, QueryParams},
    location::Coordinates,
    merchant::{
        CreateMerchantRequest, CreateMerchantResponse, MerchantApiResponse, MerchantLookupResponse,
    },
};
use error_stack::report;
use interfaces::{
    device::{FileDownloader, LocationProvider},
    merchant_api::{MerchantApi, ReverseGeocoder},
};
use merchant_registration::{FormOptions, FormServices, RegistrationForm};
use serde_json::{json, Value};

pub const BENGALURU: Coordinates = Coordinates {
    latitude: 12.9716,
    longitude: 77.5946,
};

pub const BENGALURU_ADDRESS: &str = "MG Road, Bengaluru, Karnataka, India";

pub const QR_LINK: &str = "upi://pay?pa=cafe@upi&pn=Cafe%20X";

/// Merchant API double that records every call.
pub struct FakeMerchantApi {
    create_reply: Result<MerchantApiResponse, ApiClientError>,
    lookup_reply: Option<MerchantLookupResponse>,
    created: Mutex<Vec<Value>>,
    lookups: Mutex<Vec<String>>,
}

impl FakeMerchantApi {
    pub fn responding(status_code: u16, body: Value) -> Self {
        let body: CreateMerchantResponse = serde_json::from_value(body).unwrap();
        Self {
            create_reply: Ok(MerchantApiResponse { status_code, body }),
            lookup_reply: None,
            created: Mutex::default(),
            lookups: Mutex::default(),
        }
    }

    pub fn failing(error: ApiClientError) -> Self {
        Self {
            create_reply: Err(error),
            lookup_reply: None,
            created: Mutex::default(),
            lookups: Mutex::default(),
        }
    }

    pub fn with_lookup(mut self, listing: Value) -> Self {
        self.lookup_reply = Some(serde_json::from_value(listing).unwrap());
        self
    }

    pub fn created_requests(&self) -> Vec<Value> {
        self.created.lock().unwrap().clone()
    }

    pub fn looked_up_campaigns(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl MerchantApi for FakeMerchantApi {
    async fn create_merchant(
        &self,
        request: &CreateMerchantRequest,
    ) -> CustomResult<MerchantApiResponse, ApiClientError> {
        self.created
            .lock()
            .unwrap()
            .push(serde_json::to_value(request).unwrap());
        self.create_reply.clone().map_err(|error| report!(error))
    }

    async fn campaign_merchants(
        &self,
        campaign_id: &str,
    ) -> CustomResult<MerchantLookupResponse, ApiClientError> {
        self.lookups.lock().unwrap().push(campaign_id.to_string());
        self.lookup_reply
            .clone()
            .ok_or_else(|| report!(ApiClientError::ErrorResponse { status_code: 404 }))
    }
}

pub struct FakeGeocoder {
    reply: Result<String, ApiClientError>,
    calls: Mutex<Vec<Coordinates>>,
}

impl FakeGeocoder {
    pub fn answering(address: &str) -> Self {
        Self {
            reply: Ok(address.to_string()),
            calls: Mutex::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: Err(ApiClientError::RequestNotSent("connection refused".to_string())),
            calls: Mutex::default(),
        }
    }

    pub fn calls(&self) -> Vec<Coordinates> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ReverseGeocoder for FakeGeocoder {
    async fn reverse(&self, coordinates: Coordinates) -> CustomResult<String, ApiClientError> {
        self.calls.lock().unwrap().push(coordinates);
        self.reply.clone().map_err(|error| report!(error))
    }
}

pub struct FakeLocation {
    reply: Result<Coordinates, LocationError>,
    calls: AtomicUsize,
}

impl FakeLocation {
    pub fn at(coordinates: Coordinates) -> Self {
        Self {
            reply: Ok(coordinates),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: LocationError) -> Self {
        Self {
            reply: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl LocationProvider for FakeLocation {
    async fn current_position(&self) -> CustomResult<Coordinates, LocationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.map_err(|error| report!(error))
    }
}

#[derive(Default)]
pub struct RecordingDownloader {
    fail: bool,
    downloads: Mutex<Vec<(String, String)>>,
}

impl RecordingDownloader {
    pub fn failing() -> Self {
        Self {
            fail: true,
            downloads: Mutex::default(),
        }
    }

    pub fn downloads(&self) -> Vec<(String, String)> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl FileDownloader for RecordingDownloader {
    async fn download(&self, file_name: &str, data_url: &str) -> CustomResult<(), DownloadError> {
        if self.fail {
            return Err(report!(DownloadError::WriteFailed));
        }
        self.downloads
            .lock()
            .unwrap()
            .push((file_name.to_string(), data_url.to_string()));
        Ok(())
    }
}

/// Fakes wired into a form, kept around for assertions.
pub struct Harness {
    pub api: Arc<FakeMerchantApi>,
    pub geocoder: Arc<FakeGeocoder>,
    pub location: Arc<FakeLocation>,
    pub downloader: Arc<RecordingDownloader>,
    pub options: FormOptions,
}

impl Harness {
    pub fn new(api: FakeMerchantApi) -> Self {
        Self {
            api: Arc::new(api),
            geocoder: Arc::new(FakeGeocoder::answering(BENGALURU_ADDRESS)),
            location: Arc::new(FakeLocation::at(BENGALURU)),
            downloader: Arc::new(RecordingDownloader::default()),
            options: FormOptions::default(),
        }
    }

    pub fn with_location(mut self, location: FakeLocation) -> Self {
        self.location = Arc::new(location);
        self
    }

    pub fn with_geocoder(mut self, geocoder: FakeGeocoder) -> Self {
        self.geocoder = Arc::new(geocoder);
        self
    }

    pub fn with_downloader(mut self, downloader: RecordingDownloader) -> Self {
        self.downloader = Arc::new(downloader);
        self
    }

    pub fn resolving_qr_via_lookup(mut self) -> Self {
        self.options.resolve_qr_via_lookup = true;
        self
    }

    pub fn services(&self) -> FormServices {
        FormServices {
            merchant_api: self.api.clone(),
            geocoder: self.geocoder.clone(),
            location: self.location.clone(),
            downloader: self.downloader.clone(),
        }
    }

    pub fn form(&self, query: &str) -> RegistrationForm {
        RegistrationForm::new(QueryParams::parse(query), self.services(), self.options)
    }

    /// A mounted form for campaign `abc123` of company `Acme`.
    pub async fn mounted_form(&self) -> RegistrationForm {
        let mut form = self.form("?campaign=abc123&company=Acme");
        form.mount().await;
        form
    }
}

pub fn created_body() -> Value {
    json!({
        "message": "Merchant created successfully",
        "merchant": {
            "id": "m_1",
            "merchantName": "Cafe X",
            "merchantCode": "MC001",
            "qrLink": QR_LINK
        }
    })
}

pub fn fill_details(form: &mut RegistrationForm) {
    form.handle_change(FormField::MerchantName, "Cafe X");
    form.handle_change(FormField::MerchantMobile, "9876543210");
}

pub fn fill_payment_info(form: &mut RegistrationForm) {
    form.handle_change(FormField::UpiId, "cafe@upi");
}
