use encointer_primitives::ramp::{ClaimWithClaimant, OrderIdType, OrderWithId};
use encointer_rpc::Error;
use jsonrpsee::{core::RpcResult, proc_macros::rpc};
use pallet_encointer_ramp_rpc_runtime_api::RampApi as RampRuntimeApi;
use parity_scale_codec::Codec;
use serde::Serialize;
use sp_api::ProvideRuntimeApi;
use sp_blockchain::HeaderBackend;
use sp_runtime::traits::Block as BlockT;
use std::sync::Arc;

const LOG: &str = "encointer::ramp-rpc";

#[rpc(client, server)]
pub trait RampApi<BlockHash, AccountId, Balance, Moment> {
	/// All orders ever posted, in ascending id order.
	#[method(name = "encointer_rampListOrders")]
	fn list_orders(&self, at: Option<BlockHash>) -> RpcResult<Vec<OrderWithId<AccountId, Balance>>>;

	/// The claims on `order_id`, in order of their first submission.
	#[method(name = "encointer_rampListClaims")]
	fn list_claims(
		&self,
		order_id: OrderIdType,
		at: Option<BlockHash>,
	) -> RpcResult<Vec<ClaimWithClaimant<AccountId, Moment>>>;
}

pub struct RampRpc<Client, Block, AccountId, Balance, Moment> {
	client: Arc<Client>,
	_marker: std::marker::PhantomData<(Block, AccountId, Balance, Moment)>,
}

impl<Client, Block, AccountId, Balance, Moment> RampRpc<Client, Block, AccountId, Balance, Moment> {
	pub fn new(client: Arc<Client>) -> Self {
		RampRpc { client, _marker: Default::default() }
	}
}

impl<Client, Block, AccountId, Balance, Moment>
	RampApiServer<<Block as BlockT>::Hash, AccountId, Balance, Moment>
	for RampRpc<Client, Block, AccountId, Balance, Moment>
where
	AccountId: 'static + Codec + Serialize + Send + Sync,
	Balance: 'static + Codec + Serialize + Send + Sync,
	Moment: 'static + Codec + Serialize + Send + Sync,
	Block: BlockT,
	Client: Send + Sync + 'static + ProvideRuntimeApi<Block> + HeaderBackend<Block>,
	Client::Api: RampRuntimeApi<Block, AccountId, Balance, Moment>,
{
	fn list_orders(
		&self,
		at: Option<<Block as BlockT>::Hash>,
	) -> RpcResult<Vec<OrderWithId<AccountId, Balance>>> {
		let api = self.client.runtime_api();
		let at = at.unwrap_or_else(|| self.client.info().best_hash);
		api.list_orders(at).map_err(|e| {
			log::warn!(target: LOG, "list_orders failed at {:?}: {:?}", at, e);
			Error::Runtime(e.into()).into()
		})
	}

	fn list_claims(
		&self,
		order_id: OrderIdType,
		at: Option<<Block as BlockT>::Hash>,
	) -> RpcResult<Vec<ClaimWithClaimant<AccountId, Moment>>> {
		let api = self.client.runtime_api();
		let at = at.unwrap_or_else(|| self.client.info().best_hash);
		api.list_claims(at, order_id).map_err(|e| {
			log::warn!(target: LOG, "list_claims({}) failed at {:?}: {:?}", order_id, at, e);
			Error::Runtime(e.into()).into()
		})
	}
}
