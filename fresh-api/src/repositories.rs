use crate::endpoints::{
    bills::{CreateBill, GetBill, ListBills, NewBill, UpdateBill},
    providers::{CreateProvider, GetProvider, ListProviders, NewProvider},
    signers::{CreateSigner, ListSigners, NewSigner},
    vegetables::{CreateVegetable, ListVegetables, NewVegetable},
};

pub struct BillRepository;

impl BillRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListBills {
        ListBills::new()
    }

    pub fn get(&self, bill_id: impl Into<String>) -> GetBill {
        GetBill::new(bill_id)
    }

    pub fn create(&self, bill: NewBill) -> CreateBill {
        CreateBill::new(bill)
    }

    pub fn update(&self, bill_id: impl Into<String>) -> UpdateBill {
        UpdateBill::new(bill_id)
    }
}

pub struct ProviderRepository;

impl ProviderRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListProviders {
        ListProviders::new()
    }

    pub fn get(&self, provider_id: impl Into<String>) -> GetProvider {
        GetProvider::new(provider_id)
    }

    pub fn create(&self, provider: NewProvider) -> CreateProvider {
        CreateProvider::new(provider)
    }
}

pub struct SignerRepository;

impl SignerRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListSigners {
        ListSigners::new()
    }

    pub fn create(&self, signer: NewSigner) -> CreateSigner {
        CreateSigner::new(signer)
    }
}

pub struct VegetableRepository;

impl VegetableRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListVegetables {
        ListVegetables::new()
    }

    pub fn create(&self, vegetable: NewVegetable) -> CreateVegetable {
        CreateVegetable::new(vegetable)
    }
}
