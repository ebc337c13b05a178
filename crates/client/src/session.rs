//! Session
//!
//! The signed-in user, their bearer token and their cart. Every cart change is
//! written through to the [`CartStore`] so the cart survives restarts; the
//! token lives only as long as the session.

use std::sync::Arc;

use async_trait::async_trait;
use greengrocer::{
    cart::{Cart, CartLine, CartProduct},
    orders::{DeliveryDetails, OrderRequest},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    api::StorefrontApi,
    cart_store::CartStore,
    error::ClientError,
    models::{AuthSession, Order, PlaceOrder, Product, User},
    poller::OrderSource,
    view::{Capabilities, OrderView},
};

/// Token and profile of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    /// Bearer token sent with authenticated requests.
    pub token: String,
    /// Profile returned at sign-in.
    pub user: User,
}

impl From<AuthSession> for SignedIn {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token,
            user: session.user,
        }
    }
}

/// A storefront visit: the cart plus whoever is signed in.
#[derive(Debug)]
pub struct Session<A, S> {
    api: Arc<A>,
    store: S,
    cart: Cart,
    signed_in: Option<SignedIn>,
}

impl<A: StorefrontApi, S: CartStore> Session<A, S> {
    /// Start a signed-out session with the stored cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored cart cannot be loaded.
    pub fn open(api: Arc<A>, store: S) -> Result<Self, ClientError> {
        let cart = store.load()?;

        Ok(Self {
            api,
            store,
            cart,
            signed_in: None,
        })
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the credentials are rejected.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&User, ClientError> {
        let session = self.api.login(email, password).await?;

        Ok(&self.sign_in(session.into()).user)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the account cannot be created.
    pub async fn register(&mut self, email: &str, password: &str) -> Result<&User, ClientError> {
        let session = self.api.register(email, password).await?;

        Ok(&self.sign_in(session.into()).user)
    }

    /// Sign in with a token saved from an earlier session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the token is invalid or expired.
    pub async fn resume(&mut self, token: String) -> Result<&User, ClientError> {
        let user = self.api.verify(&token).await?;

        Ok(&self.sign_in(SignedIn { token, user }).user)
    }

    /// Forget the token. The cart is kept.
    pub fn logout(&mut self) {
        if let Some(signed_in) = self.signed_in.take() {
            info!(user = %signed_in.user.uuid, "signed out");
        }
    }

    fn sign_in(&mut self, signed_in: SignedIn) -> &SignedIn {
        info!(user = %signed_in.user.uuid, admin = signed_in.user.is_admin, "signed in");

        self.signed_in.insert(signed_in)
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.signed_in.as_ref().map(|signed_in| &signed_in.user)
    }

    /// The signed-in user's bearer token, if any.
    pub fn token(&self) -> Option<&str> {
        self.signed_in
            .as_ref()
            .map(|signed_in| signed_in.token.as_str())
    }

    /// What the current viewer may do.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::for_user(self.user())
    }

    /// Render `order` for the current viewer.
    pub fn view<'a>(&self, order: &'a Order) -> OrderView<'a> {
        OrderView::new(order, self.capabilities())
    }

    /// The cart as last saved.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add `quantity` of `product`, merging with an existing line.
    ///
    /// # Errors
    ///
    /// Returns an error if the quantity is invalid or the cart cannot be saved.
    pub fn add_to_cart(&mut self, product: &Product, quantity: u32) -> Result<(), ClientError> {
        self.cart.add(CartProduct::from(product), quantity)?;

        self.persist_cart()
    }

    /// Change a line's quantity; zero removes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not in the cart or the cart cannot be saved.
    pub fn set_quantity(&mut self, product: Uuid, quantity: u32) -> Result<(), ClientError> {
        self.cart.set_quantity(product, quantity)?;

        self.persist_cart()
    }

    /// # Errors
    ///
    /// Returns an error if the cart cannot be saved.
    pub fn remove_from_cart(&mut self, product: Uuid) -> Result<Option<CartLine>, ClientError> {
        let removed = self.cart.remove(product);

        if removed.is_some() {
            self.persist_cart()?;
        }

        Ok(removed)
    }

    /// # Errors
    ///
    /// Returns an error if the stored cart cannot be removed.
    pub fn clear_cart(&mut self) -> Result<(), ClientError> {
        self.cart.clear();
        self.store.clear()?;

        Ok(())
    }

    fn persist_cart(&self) -> Result<(), ClientError> {
        self.store.save(&self.cart)?;

        Ok(())
    }

    fn signed_in(&self) -> Result<&SignedIn, ClientError> {
        self.signed_in.as_ref().ok_or(ClientError::NotSignedIn)
    }

    /// Place an order for everything in the cart.
    ///
    /// The cart is cleared only once the API accepts the order. A rejected
    /// token signs the session out.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotSignedIn`]: no user is signed in.
    /// - [`ClientError::EmptyCart`]: the cart has no lines.
    /// - [`ClientError::InvalidOrder`]: delivery details are incomplete.
    /// - [`ClientError::Api`]: the API rejected the order, e.g. for stock.
    pub async fn checkout(&mut self, delivery: DeliveryDetails) -> Result<Order, ClientError> {
        let token = self.signed_in()?.token.clone();

        if self.cart.is_empty() {
            return Err(ClientError::EmptyCart);
        }

        let (delivery, lines) = OrderRequest::new(delivery, self.cart.to_order_lines())?.into_parts();

        let order = match self
            .api
            .place_order(&token, &PlaceOrder::new(delivery, lines))
            .await
        {
            Ok(order) => order,
            Err(error) => {
                if error.is_unauthorized() {
                    self.logout();
                }

                return Err(error);
            }
        };

        info!(order = %order.uuid, total = %order.total_amount, "order placed");

        self.cart.clear();

        if let Err(error) = self.store.clear() {
            warn!(%error, "failed to clear stored cart after checkout");
        }

        Ok(order)
    }

    /// The signed-in user's orders.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotSignedIn`] or the API's error.
    pub async fn orders(&self) -> Result<Vec<Order>, ClientError> {
        self.api.list_orders(&self.signed_in()?.token).await
    }

    /// Every order in the store, or [`None`] if the viewer may not see them.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotSignedIn`] or the API's error.
    pub async fn all_orders(&self) -> Result<Option<Vec<Order>>, ClientError> {
        let signed_in = self.signed_in()?;

        if !self.capabilities().can_manage_orders() {
            return Ok(None);
        }

        self.api.list_all_orders(&signed_in.token).await.map(Some)
    }

    /// Move `order` one step forward if the viewer may do so.
    ///
    /// Returns [`None`] when no action is available.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotSignedIn`] or the API's error.
    pub async fn advance_order(&self, order: &Order) -> Result<Option<Order>, ClientError> {
        let signed_in = self.signed_in()?;

        let Some(next) = self.view(order).next_status_action() else {
            return Ok(None);
        };

        self.api
            .update_order_status(&signed_in.token, order.uuid, next)
            .await
            .map(Some)
    }

    /// An [`OrderSource`] reading orders as the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotSignedIn`] if nobody is signed in.
    pub fn order_source(&self) -> Result<SessionOrders<A>, ClientError> {
        Ok(SessionOrders {
            api: Arc::clone(&self.api),
            token: self.signed_in()?.token.clone(),
        })
    }
}

/// Orders fetched with a session's token.
#[derive(Debug)]
pub struct SessionOrders<A> {
    api: Arc<A>,
    token: String,
}

#[async_trait]
impl<A: StorefrontApi> OrderSource for SessionOrders<A> {
    async fn fetch_order(&self, order: Uuid) -> Result<Order, ClientError> {
        self.api.get_order(&self.token, order).await
    }
}
