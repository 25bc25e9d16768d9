//! [`Command`] for concluding a new [`Rent`] contract.

use common::{
    operations::{Insert, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{contract, space, user, Rent, Space, User},
    infra::{self, Backend},
    pricing::{self, Months, Quote},
    Service,
};

use super::Command;

/// [`Command`] for concluding a new [`Rent`] contract upon a [`Space`].
#[derive(Clone, Debug)]
pub struct ConcludeRentContract {
    /// [`Space`] being rented out.
    pub space: Space,

    /// [`User`] renting the [`Space`].
    pub tenant: User,

    /// Duration of the rent.
    pub duration: Months,

    /// Method the initial payment is made with.
    pub payment_method: contract::PaymentMethod,

    /// Electronic signature of the tenant.
    pub signature: contract::Signature,

    /// Whether the tenant has accepted the contract terms.
    pub terms_accepted: bool,
}

/// Outcome of a [`ConcludeRentContract`] execution: the submitted [`Rent`]
/// along with the [`Quote`] its terms were derived from.
#[derive(Clone, Debug)]
pub struct Concluded {
    /// Concluded [`Rent`] contract.
    pub contract: Rent,

    /// [`Quote`] the contract terms were derived from.
    pub quote: Quote,
}

impl<B> Command<ConcludeRentContract> for Service<B>
where
    B: Backend<Insert<Rent>, Ok = (), Err = Traced<infra::Error>>
        + Backend<Update<Space>, Ok = (), Err = Traced<infra::Error>>,
{
    type Ok = Concluded;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ConcludeRentContract,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ConcludeRentContract {
            mut space,
            tenant,
            duration,
            payment_method,
            signature,
            terms_accepted,
        } = cmd;

        if tenant.role != user::Role::Tenant {
            return Err(tracerr::new!(E::NotTenant(tenant.id)));
        }
        if !space.available {
            return Err(tracerr::new!(E::SpaceUnavailable(space.id)));
        }
        if !terms_accepted {
            return Err(tracerr::new!(E::TermsNotAccepted));
        }

        tracing::debug!(space = %space.id, %duration, "pricing the rent");
        let quote = pricing::quote(space.price_per_month, duration)
            .map_err(E::from)
            .map_err(tracerr::wrap!())?;

        let signed_at: contract::SigningDateTime = DateTime::now().coerce();
        let commences_at: contract::CommencementDateTime = signed_at.coerce();
        let expires_at: contract::ExpirationDateTime =
            u32::try_from(duration.get())
                .ok()
                .and_then(|months| commences_at.checked_add_months(months))
                .ok_or(E::ExpiryOutOfRange)
                .map_err(tracerr::wrap!())?
                .coerce();

        let contract = Rent {
            id: contract::Id::new(),
            number: contract::Number::generate(signed_at),
            space_id: space.id,
            tenant_id: tenant.id,
            duration,
            // The submitted copies are rounded to cents here, at the
            // serialization boundary. The `Quote` itself stays unrounded.
            monthly_rent: quote.monthly_rent.rounded(),
            security_deposit: quote.security_deposit.rounded(),
            payment_method,
            notes: conclusion_notes(&quote, duration, payment_method, &signature),
            signature,
            is_paid: true,
            signed_at,
            commences_at,
            expires_at,
            terminated_at: None,
        };

        self.backend()
            .execute(Insert(contract.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // The contract is concluded at this point, so failing to delist the
        // `Space` must not fail the whole flow.
        space.available = false;
        if let Err(e) = self.backend().execute(Update(space)).await {
            tracing::warn!("failed to delist the rented `Space`: {e}");
        }

        Ok(Concluded { contract, quote })
    }
}

/// Renders the [`contract::Notes`] summarizing a conclusion.
fn conclusion_notes(
    quote: &Quote,
    duration: Months,
    payment_method: contract::PaymentMethod,
    signature: &contract::Signature,
) -> contract::Notes {
    contract::Notes::from(format!(
        "Contract concluded electronically. \
         Payment method: {payment_method}. \
         Duration: {duration} months. \
         Applied discount: {discount}%. \
         Savings: {savings}. \
         Pricing tier: {tier}. \
         Signature: {signature}",
        discount = quote.discount,
        savings = quote.discount_amount.rounded(),
        tier = quote.tier.label(),
    ))
}

/// Error of [`ConcludeRentContract`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    #[from]
    Backend(infra::Error),

    /// Provided pricing inputs are not valid.
    #[display("cannot price the contract: {_0}")]
    #[from]
    Pricing(pricing::InvalidInput),

    /// [`User`] is not a tenant.
    #[display("`User(id: {_0})` is not a tenant")]
    NotTenant(#[error(not(source))] user::Id),

    /// [`Space`] is not available for rent.
    #[display("`Space(id: {_0})` is not available for rent")]
    SpaceUnavailable(#[error(not(source))] space::Id),

    /// Contract terms were not accepted by the tenant.
    #[display("contract terms are not accepted")]
    TermsNotAccepted,

    /// Contract expiry date is out of the representable range.
    #[display("contract expiry date is out of the representable range")]
    ExpiryOutOfRange,
}

#[cfg(test)]
mod spec {
    use std::cell::RefCell;

    use common::{
        money::Currency,
        operations::{Insert, Update},
        DateTime, Money,
    };
    use futures::executor::block_on;
    use tracerr::Traced;

    use crate::{
        domain::{contract, space, user, Rent, Space, User},
        infra,
        pricing::Months,
        Config, Service,
    };

    use super::{Command as _, ConcludeRentContract, ExecutionError};

    /// In-memory [`Backend`](crate::infra::Backend) fake.
    #[derive(Debug, Default)]
    struct FakeBackend {
        /// [`Rent`]s inserted into this [`FakeBackend`].
        contracts: RefCell<Vec<Rent>>,

        /// [`Space`]s updated in this [`FakeBackend`].
        spaces: RefCell<Vec<Space>>,

        /// Whether [`Insert`]s should fail.
        fail_insert: bool,

        /// Whether [`Update`]s should fail.
        fail_update: bool,
    }

    impl common::Handler<Insert<Rent>> for FakeBackend {
        type Ok = ();
        type Err = Traced<infra::Error>;

        async fn execute(
            &self,
            Insert(contract): Insert<Rent>,
        ) -> Result<Self::Ok, Self::Err> {
            if self.fail_insert {
                return Err(tracerr::new!(infra::Error::Unreachable));
            }
            self.contracts.borrow_mut().push(contract);
            Ok(())
        }
    }

    impl common::Handler<Update<Space>> for FakeBackend {
        type Ok = ();
        type Err = Traced<infra::Error>;

        async fn execute(
            &self,
            Update(space): Update<Space>,
        ) -> Result<Self::Ok, Self::Err> {
            if self.fail_update {
                return Err(tracerr::new!(infra::Error::Rejected {
                    reason: "space is gone".into(),
                }));
            }
            self.spaces.borrow_mut().push(space);
            Ok(())
        }
    }

    fn eur(s: &str) -> Money {
        Money {
            amount: s.parse().unwrap(),
            currency: Currency::Eur,
        }
    }

    fn space() -> Space {
        Space {
            id: space::Id::new(),
            name: space::Name::new("Piata Romana Office").unwrap(),
            description: None,
            address: space::Address::new("Bd. Magheru 12, Bucharest").unwrap(),
            kind: space::Kind::Office,
            area: space::Area::new("120.5".parse().unwrap()).unwrap(),
            price_per_month: eur("1000"),
            floors: Some(space::Floors::from(2)),
            num_rooms: Some(space::NumRooms::from(6)),
            max_occupancy: None,
            ceiling_height: None,
            has_loading_dock: None,
            available: true,
            created_at: DateTime::now().coerce(),
        }
    }

    fn tenant() -> User {
        User {
            id: user::Id::new(),
            name: user::Name::new("Ion Popescu").unwrap(),
            email: user::Email::new("ion.popescu@example.com").unwrap(),
            role: user::Role::Tenant,
        }
    }

    fn cmd() -> ConcludeRentContract {
        ConcludeRentContract {
            space: space(),
            tenant: tenant(),
            duration: Months::from(24),
            payment_method: contract::PaymentMethod::Card,
            signature: contract::Signature::new("Ion Popescu").unwrap(),
            terms_accepted: true,
        }
    }

    fn service(backend: FakeBackend) -> Service<FakeBackend> {
        Service::new(Config::default(), backend)
    }

    #[test]
    fn concludes_and_delists() {
        let svc = service(FakeBackend::default());

        let out = block_on(svc.execute(cmd())).unwrap();

        assert_eq!(out.contract.monthly_rent, eur("900.00"));
        assert_eq!(out.contract.security_deposit, eur("2000.00"));
        assert_eq!(out.contract.duration, Months::from(24));
        assert!(out.contract.is_paid);
        assert!(out.contract.terminated_at.is_none());
        assert_eq!(out.quote.initial_payment, eur("2900"));

        let contracts = svc.backend().contracts.borrow();
        assert_eq!(contracts.len(), 1);
        assert_eq!(contracts[0].id, out.contract.id);

        let spaces = svc.backend().spaces.borrow();
        assert_eq!(spaces.len(), 1);
        assert!(!spaces[0].available);
    }

    #[test]
    fn expires_after_the_whole_duration() {
        let svc = service(FakeBackend::default());

        let out = block_on(svc.execute(cmd())).unwrap();

        let expected = out
            .contract
            .commences_at
            .checked_add_months(24)
            .unwrap();
        assert_eq!(out.contract.expires_at, expected.coerce());
    }

    #[test]
    fn summarizes_the_conclusion_in_notes() {
        let svc = service(FakeBackend::default());

        let out = block_on(svc.execute(cmd())).unwrap();

        let notes = out.contract.notes.to_string();
        assert!(notes.contains("Payment method: CARD"), "{notes}");
        assert!(notes.contains("Duration: 24 months"), "{notes}");
        assert!(notes.contains("Applied discount: 10%"), "{notes}");
        assert!(notes.contains("Savings: 2400EUR"), "{notes}");
        assert!(notes.contains("Pricing tier: Long-Term"), "{notes}");
        assert!(notes.contains("Signature: Ion Popescu"), "{notes}");
    }

    #[test]
    fn rejects_non_tenant() {
        let svc = service(FakeBackend::default());
        let mut cmd = cmd();
        cmd.tenant.role = user::Role::Owner;

        let err = block_on(svc.execute(cmd)).unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::NotTenant(_)),
            "{err}",
        );
        assert!(svc.backend().contracts.borrow().is_empty());
    }

    #[test]
    fn rejects_unavailable_space() {
        let svc = service(FakeBackend::default());
        let mut cmd = cmd();
        cmd.space.available = false;

        let err = block_on(svc.execute(cmd)).unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::SpaceUnavailable(_)),
            "{err}",
        );
    }

    #[test]
    fn rejects_unaccepted_terms() {
        let svc = service(FakeBackend::default());
        let mut cmd = cmd();
        cmd.terms_accepted = false;

        let err = block_on(svc.execute(cmd)).unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::TermsNotAccepted),
            "{err}",
        );
    }

    #[test]
    fn rejects_unpriceable_listing() {
        let svc = service(FakeBackend::default());
        let mut cmd = cmd();
        cmd.space.price_per_month = eur("0");

        let err = block_on(svc.execute(cmd)).unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::Pricing(_)),
            "{err}",
        );
        assert!(svc.backend().contracts.borrow().is_empty());
    }

    #[test]
    fn propagates_submission_failure() {
        let svc = service(FakeBackend {
            fail_insert: true,
            ..FakeBackend::default()
        });

        let err = block_on(svc.execute(cmd())).unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::Backend(_)),
            "{err}",
        );
        assert!(svc.backend().spaces.borrow().is_empty());
    }

    #[test]
    fn tolerates_delisting_failure() {
        let svc = service(FakeBackend {
            fail_update: true,
            ..FakeBackend::default()
        });

        let out = block_on(svc.execute(cmd())).unwrap();

        assert_eq!(svc.backend().contracts.borrow().len(), 1);
        assert_eq!(out.contract.monthly_rent, eur("900.00"));
    }

    #[test]
    fn wizard_preselects_a_year() {
        assert_eq!(Config::default().default_duration, Months::YEAR);
    }
}
