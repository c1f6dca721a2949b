//! Request lifecycle service.
//!
//! Every transition is a conditional update in the repository; this
//! service layers authorization, validation, and notification fan-out
//! on top. Notifications are dispatched after the transition commits,
//! so observers never learn of a state the store does not hold.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use hemolink_core::types::pagination::{PageRequest, PageResponse};
use hemolink_core::{AppError, AppResult};
use hemolink_database::repositories::{BloodRequestRepository, NewBloodRequest};
use hemolink_entity::blood_request::{BloodRequest, BloodType, UrgencyLevel};
use hemolink_entity::notification::{Recipient, event};
use hemolink_realtime::FanoutDispatcher;
use hemolink_realtime::message::types::OutboundMessage;

use crate::context::RequestContext;
use crate::matcher::DonorMatcher;

/// Attributes of a new blood request, as submitted by a client.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequestInput {
    /// Required blood type.
    pub blood_type: BloodType,
    /// Units needed.
    pub units: i32,
    /// Urgency level.
    pub urgency: UrgencyLevel,
    /// Date by which the blood is required.
    pub required_by: chrono::NaiveDate,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Latitude of the requester.
    #[serde(default)]
    pub latitude: f64,
    /// Longitude of the requester.
    #[serde(default)]
    pub longitude: f64,
}

/// Drives the blood request state machine.
#[derive(Debug, Clone)]
pub struct RequestLifecycleService {
    requests: Arc<BloodRequestRepository>,
    matcher: DonorMatcher,
    dispatcher: Arc<FanoutDispatcher>,
}

impl RequestLifecycleService {
    /// Create a new lifecycle service.
    pub fn new(
        requests: Arc<BloodRequestRepository>,
        matcher: DonorMatcher,
        dispatcher: Arc<FanoutDispatcher>,
    ) -> Self {
        Self {
            requests,
            matcher,
            dispatcher,
        }
    }

    /// Create a request and fan notifications out to eligible donors.
    ///
    /// The requester is taken from the caller's verified identity, never
    /// from the payload. A fan-out persistence failure for one donor is
    /// logged and does not abort delivery to the rest.
    pub async fn create_request(
        &self,
        ctx: &RequestContext,
        input: CreateRequestInput,
    ) -> AppResult<BloodRequest> {
        let requester = ctx.requester()?;

        if input.units < 1 {
            return Err(AppError::validation("Units must be at least 1"));
        }
        if input.required_by < Utc::now().date_naive() {
            return Err(AppError::validation("Required-by date must not be in the past"));
        }

        let request = self
            .requests
            .create(&NewBloodRequest {
                requester,
                blood_type: input.blood_type,
                units: input.units,
                urgency: input.urgency,
                required_by: input.required_by,
                notes: input.notes,
                latitude: input.latitude,
                longitude: input.longitude,
            })
            .await?;

        tracing::info!(
            "Blood request {} created: {} unit(s) of {}, {} urgency",
            request.id,
            request.units,
            request.blood_type,
            request.urgency
        );

        let message = format!(
            "{} unit(s) of {} needed by {} ({} urgency)",
            request.units, request.blood_type, request.required_by, request.urgency
        );
        for donor_id in self.matcher.find_eligible(request.blood_type).await? {
            self.notify_quietly(
                Recipient::donor(donor_id),
                event::BLOOD_REQUEST,
                "New blood request",
                &message,
                request.id,
                None,
            )
            .await;
        }
        self.notify_quietly(
            Recipient::admin_group(),
            event::BLOOD_REQUEST,
            "New blood request",
            &format!("{} requested {}", ctx.name, message),
            request.id,
            None,
        )
        .await;

        // Echo the full row back over the creator's live channels.
        self.dispatcher.push(
            &ctx.recipient(),
            &OutboundMessage::BloodRequest {
                request: request.clone(),
            },
        );

        Ok(request)
    }

    /// Get a single request.
    pub async fn get_request(&self, id: Uuid) -> AppResult<BloodRequest> {
        self.requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Blood request not found"))
    }

    /// List the caller's own requests, newest first.
    pub async fn list_requests(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<BloodRequest>> {
        let requester = ctx.requester()?;
        self.requests.find_by_requester(requester, page).await
    }

    /// Donor accepts a request.
    ///
    /// A fresh accept claims a pending request (`pending → matched`). The
    /// matched donor accepting again confirms (`matched → accepted`). Any
    /// other state, or another donor racing for a matched request, is a
    /// conflict. Under concurrent accepts the conditional update lets
    /// exactly one donor claim.
    pub async fn accept_request(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
    ) -> AppResult<BloodRequest> {
        if !ctx.is_donor() {
            return Err(AppError::authorization("Only donors may accept blood requests"));
        }

        if let Some(request) = self.requests.try_claim(request_id, ctx.user_id).await? {
            tracing::info!("Request {} matched with donor {}", request.id, ctx.user_id);
            self.notify_transition(
                ctx,
                &request,
                event::DONOR_ACCEPT,
                "Donor matched",
                &format!("{} accepted your request for {}", ctx.name, request.blood_type),
            )
            .await?;
            return Ok(request);
        }

        if let Some(request) = self.requests.try_confirm(request_id, ctx.user_id).await? {
            tracing::info!("Request {} confirmed by donor {}", request.id, ctx.user_id);
            self.notify_transition(
                ctx,
                &request,
                event::REQUEST_ACCEPTED,
                "Donation confirmed",
                &format!("{} confirmed the donation for {}", ctx.name, request.blood_type),
            )
            .await?;
            return Ok(request);
        }

        match self.requests.find_by_id(request_id).await? {
            None => Err(AppError::not_found("Blood request not found")),
            Some(_) => Err(AppError::conflict("Request is no longer available for acceptance")),
        }
    }

    /// Matched donor withdraws; the request re-opens.
    ///
    /// The rejection itself lives only in the dispatched notification;
    /// the row goes straight back to `pending` so other donors can claim.
    pub async fn reject_request(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
    ) -> AppResult<BloodRequest> {
        if !ctx.is_donor() {
            return Err(AppError::authorization("Only donors may reject blood requests"));
        }

        if let Some(request) = self.requests.try_release(request_id, ctx.user_id).await? {
            tracing::info!("Request {} released by donor {}", request.id, ctx.user_id);
            self.notify_transition(
                ctx,
                &request,
                event::REQUEST_REJECTED,
                "Donor withdrew",
                &format!("{} withdrew; your request for {} is open again", ctx.name, request.blood_type),
            )
            .await?;
            return Ok(request);
        }

        match self.requests.find_by_id(request_id).await? {
            None => Err(AppError::not_found("Blood request not found")),
            Some(_) => Err(AppError::conflict(
                "Only the matched donor may withdraw from a matched request",
            )),
        }
    }

    /// Requester (or admin) cancels a request.
    ///
    /// Permitted from `pending` or `matched` only; settled requests stay
    /// settled.
    pub async fn cancel_request(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
    ) -> AppResult<BloodRequest> {
        let existing = self.get_request(request_id).await?;
        self.authorize_requester(ctx, &existing)?;

        let Some(request) = self.requests.try_cancel(request_id).await? else {
            return Err(AppError::conflict("Request can no longer be cancelled"));
        };

        tracing::info!("Request {} cancelled by {}", request.id, ctx.user_id);
        // The transition clears the column; the pre-transition row still
        // names the donor to inform.
        if let Some(donor_id) = existing.matched_donor_id {
            self.notify_quietly(
                Recipient::donor(donor_id),
                event::REQUEST_CANCELLED,
                "Request cancelled",
                &format!("The request for {} you matched was cancelled", request.blood_type),
                request.id,
                Some(donor_id),
            )
            .await;
        }
        self.notify_quietly(
            Recipient::admin_group(),
            event::REQUEST_CANCELLED,
            "Request cancelled",
            &format!("{} cancelled a request for {}", ctx.name, request.blood_type),
            request.id,
            existing.matched_donor_id,
        )
        .await;
        self.push_update(&request);

        Ok(request)
    }

    /// Requester (or admin) marks an accepted request fulfilled.
    pub async fn fulfill_request(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
    ) -> AppResult<BloodRequest> {
        let existing = self.get_request(request_id).await?;
        self.authorize_requester(ctx, &existing)?;

        let Some(request) = self.requests.try_fulfill(request_id).await? else {
            return Err(AppError::conflict("Only an accepted request can be fulfilled"));
        };

        tracing::info!("Request {} fulfilled", request.id);
        if let Some(donor_id) = request.matched_donor_id {
            self.notify_quietly(
                Recipient::donor(donor_id),
                event::REQUEST_FULFILLED,
                "Donation completed",
                &format!("The donation for the {} request was recorded", request.blood_type),
                request.id,
                Some(donor_id),
            )
            .await;
        }
        self.notify_quietly(
            Recipient::admin_group(),
            event::REQUEST_FULFILLED,
            "Request fulfilled",
            &format!("A request for {} was fulfilled", request.blood_type),
            request.id,
            request.matched_donor_id,
        )
        .await;
        self.push_update(&request);

        Ok(request)
    }

    /// Only the requester who owns the row, or an admin, may settle it.
    fn authorize_requester(&self, ctx: &RequestContext, request: &BloodRequest) -> AppResult<()> {
        if ctx.is_admin() {
            return Ok(());
        }
        let requester = request.requester()?;
        if requester.id() == ctx.user_id {
            Ok(())
        } else {
            Err(AppError::authorization("Not the owner of this blood request"))
        }
    }

    /// Notify the requester and the admin group about a donor-driven
    /// transition, then mirror the new state over live channels.
    ///
    /// The acting donor is recorded in the notification's structured
    /// match field. For a rejection that is the only place the donor
    /// survives; the row itself has already been cleared.
    async fn notify_transition(
        &self,
        ctx: &RequestContext,
        request: &BloodRequest,
        event_type: &str,
        title: &str,
        message: &str,
    ) -> AppResult<()> {
        let requester = request.requester()?;
        let recipient = Recipient::new(requester.recipient_type(), requester.id());
        let acting_donor = Some(ctx.user_id);

        self.notify_quietly(recipient, event_type, title, message, request.id, acting_donor)
            .await;
        self.notify_quietly(
            Recipient::admin_group(),
            event_type,
            title,
            &format!("Request {}: {}", request.id, message),
            request.id,
            acting_donor,
        )
        .await;
        self.push_update(request);
        Ok(())
    }

    /// Dispatch a notification, logging instead of propagating failure.
    /// The transition has already committed; delivery must not undo it.
    async fn notify_quietly(
        &self,
        recipient: Recipient,
        event_type: &str,
        title: &str,
        message: &str,
        request_id: Uuid,
        match_donor_id: Option<Uuid>,
    ) {
        if let Err(e) = self
            .dispatcher
            .notify(
                recipient,
                event_type,
                title,
                message,
                Some(request_id),
                match_donor_id,
            )
            .await
        {
            tracing::error!(
                "Failed to dispatch {} notification for request {}: {}",
                event_type,
                request_id,
                e
            );
        }
    }

    /// Transient state mirror for live requester channels.
    fn push_update(&self, request: &BloodRequest) {
        let Ok(requester) = request.requester() else {
            return;
        };
        self.dispatcher.push(
            &Recipient::new(requester.recipient_type(), requester.id()),
            &OutboundMessage::RequestUpdate {
                request_id: request.id,
                status: request.status,
                matched_donor_id: request.matched_donor_id,
            },
        );
    }
}
